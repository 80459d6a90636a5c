//! Primitive rasterizers
//!
//! Every operation shares the same prologue: resolve the requested index
//! through the shifting table, bail out when the result is transparent, clip
//! against the region, then write. Degenerate geometry and empty clip
//! intersections are silent no-ops; there is no error signal on the draw
//! path.

use super::clip::{self, Quad};
use super::{Context, Point, Rect};

impl Context<'_> {
    /// Draw a single pixel
    pub fn point(&mut self, position: Point, index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };
        self.write_point(position.x, position.y, index);
    }

    /// Horizontal run of `width` pixels starting at `origin`
    pub fn hline(&mut self, origin: Point, width: i32, index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };
        self.write_hline(origin.x, origin.y, width, index);
    }

    /// Vertical run of `height` pixels starting at `origin`
    pub fn vline(&mut self, origin: Point, height: i32, index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };

        let span = Quad::new(origin.x, origin.y, origin.x, origin.y + height - 1)
            .intersect(&self.clip);
        if span.is_empty() {
            return;
        }

        let stride = self.surface.width() as usize;
        let mut offset = self.surface.row_offset(span.y0) + span.x0 as usize;
        let pixels = self.surface.pixels_mut();
        for _ in span.y0..=span.y1 {
            pixels[offset] = index;
            offset += stride;
        }
    }

    /// Clipped Bresenham line, inclusive of both endpoints
    pub fn line(&mut self, from: Point, to: Point, index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };
        self.write_line(from, to, index);
    }

    /// Connected line segments through every vertex in order
    pub fn polyline(&mut self, vertices: &[Point], index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };
        if vertices.len() < 2 {
            return;
        }
        for pair in vertices.windows(2) {
            self.write_line(pair[0], pair[1], index);
        }
    }

    /// Filled axis-aligned rectangle
    pub fn fill_rect(&mut self, rect: Rect, index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };

        let region = Quad::new(
            rect.x,
            rect.y,
            rect.x + rect.width - 1,
            rect.y + rect.height - 1,
        )
        .intersect(&self.clip);
        if region.is_empty() {
            return;
        }

        let width = region.width() as usize;
        let stride = self.surface.width() as usize;
        let mut offset = self.surface.row_offset(region.y0) + region.x0 as usize;
        let pixels = self.surface.pixels_mut();
        for _ in region.y0..=region.y1 {
            pixels[offset..offset + width].fill(index);
            offset += stride;
        }
    }

    /// Filled triangle via incremental edge functions.
    ///
    /// Winding is normalized first, and the three edge constants carry a
    /// top-left fill-rule bias (downward edges and rightward horizontal
    /// edges own their boundary pixels), so triangles sharing an edge
    /// partition the shared pixels: none drawn twice, none missed.
    /// Zero-area triangles draw nothing.
    pub fn fill_triangle(&mut self, a: Point, b: Point, c: Point, index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };

        let region = Quad::new(
            a.x.min(b.x).min(c.x),
            a.y.min(b.y).min(c.y),
            a.x.max(b.x).max(c.x),
            a.y.max(b.y).max(c.y),
        )
        .intersect(&self.clip);
        if region.is_empty() {
            return;
        }

        let area = (b.x - a.x) as i64 * (c.y - a.y) as i64
            - (c.x - a.x) as i64 * (b.y - a.y) as i64;
        if area == 0 {
            return;
        }
        let (a, b) = if area > 0 { (b, a) } else { (a, b) };

        let dx12 = (a.x - b.x) as i64;
        let dx23 = (b.x - c.x) as i64;
        let dx31 = (c.x - a.x) as i64;
        let dy12 = (a.y - b.y) as i64;
        let dy23 = (b.y - c.y) as i64;
        let dy31 = (c.y - a.y) as i64;

        let mut c1 = dy12 * a.x as i64 - dx12 * a.y as i64;
        let mut c2 = dy23 * b.x as i64 - dx23 * b.y as i64;
        let mut c3 = dy31 * c.x as i64 - dx31 * c.y as i64;

        // Top-left fill-rule bias
        if dy12 < 0 || (dy12 == 0 && dx12 > 0) {
            c1 += 1;
        }
        if dy23 < 0 || (dy23 == 0 && dx23 > 0) {
            c2 += 1;
        }
        if dy31 < 0 || (dy31 == 0 && dx31 > 0) {
            c3 += 1;
        }

        let mut cy1 = c1 + dx12 * region.y0 as i64 - dy12 * region.x0 as i64;
        let mut cy2 = c2 + dx23 * region.y0 as i64 - dy23 * region.x0 as i64;
        let mut cy3 = c3 + dx31 * region.y0 as i64 - dy31 * region.x0 as i64;

        for y in region.y0..=region.y1 {
            let mut cx1 = cy1;
            let mut cx2 = cy2;
            let mut cx3 = cy3;

            // The inside set per scanline is contiguous: track its run and
            // blit it in one pass.
            let mut run = 0usize;
            let mut end = region.x0;
            for x in region.x0..=region.x1 {
                if cx1 > 0 && cx2 > 0 && cx3 > 0 {
                    run += 1;
                    end = x;
                }
                cx1 -= dy12;
                cx2 -= dy23;
                cx3 -= dy31;
            }
            cy1 += dx12;
            cy2 += dx23;
            cy3 += dx31;

            if run > 0 {
                let start = end - run as i32 + 1;
                let offset = self.surface.row_offset(y) + start as usize;
                self.surface.pixels_mut()[offset..offset + run].fill(index);
            }
        }
    }

    /// Circle outline via the midpoint algorithm, one octant mirrored
    /// eight ways. Zero or negative radius draws nothing.
    pub fn circle(&mut self, center: Point, radius: i32, index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };
        if radius <= 0 {
            return;
        }

        let (cx, cy) = (center.x, center.y);
        let mut x = 0;
        let mut y = radius;
        let mut d = 3 - 2 * radius;

        while x <= y {
            self.write_point(cx + x, cy + y, index);
            self.write_point(cx + y, cy + x, index);
            self.write_point(cx - y, cy + x, index);
            self.write_point(cx - x, cy + y, index);
            self.write_point(cx - x, cy - y, index);
            self.write_point(cx - y, cy - x, index);
            self.write_point(cx + y, cy - x, index);
            self.write_point(cx + x, cy - y, index);

            if d < 0 {
                d += 4 * x + 6;
            } else {
                d += 4 * (x - y) + 10;
                y -= 1;
            }
            x += 1;
        }
    }

    /// Filled circle: four clipped spans per octant step instead of
    /// per-pixel writes. Radius 0 degenerates to the center pixel; a
    /// negative radius draws nothing.
    pub fn fill_circle(&mut self, center: Point, radius: i32, index: u8) {
        let Some(index) = self.resolve(index) else {
            return;
        };
        if radius < 0 {
            return;
        }
        if radius == 0 {
            self.write_point(center.x, center.y, index);
            return;
        }

        let (cx, cy) = (center.x, center.y);
        let mut x = 0;
        let mut y = radius;
        let mut d = 3 - 2 * radius;

        while x <= y {
            let length_x = 2 * x + 1;
            let length_y = 2 * y + 1;
            self.write_hline(cx - x, cy - y, length_x, index);
            self.write_hline(cx - y, cy - x, length_y, index);
            self.write_hline(cx - y, cy + x, length_y, index);
            self.write_hline(cx - x, cy + y, length_x, index);

            if d < 0 {
                d += 4 * x + 6;
            } else {
                d += 4 * (x - y) + 10;
                y -= 1;
            }
            x += 1;
        }
    }

    // ========================================================================
    // Raw writers (index already resolved)
    // ========================================================================

    #[inline]
    pub(super) fn write_point(&mut self, x: i32, y: i32, index: u8) {
        if !self.clip.contains(x, y) {
            return;
        }
        self.surface.set_pixel(x, y, index);
    }

    pub(super) fn write_hline(&mut self, x: i32, y: i32, width: i32, index: u8) {
        let span = Quad::new(x, y, x + width - 1, y).intersect(&self.clip);
        if span.is_empty() {
            return;
        }
        let offset = self.surface.row_offset(span.y0) + span.x0 as usize;
        let width = span.width() as usize;
        self.surface.pixels_mut()[offset..offset + width].fill(index);
    }

    fn write_line(&mut self, from: Point, to: Point, index: u8) {
        let Some((a, b)) = clip::clip_segment(&self.clip, from, to) else {
            return;
        };

        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (a.x, a.y);

        loop {
            self.surface.set_pixel(x, y, index);
            if x == b.x && y == b.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Surface;

    fn count(surface: &Surface, index: u8) -> usize {
        surface.pixels().iter().filter(|&&p| p == index).count()
    }

    fn painted(surface: &Surface, index: u8) -> Vec<(i32, i32)> {
        let mut set = Vec::new();
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.pixel(x, y) == index {
                    set.push((x, y));
                }
            }
        }
        set
    }

    #[test]
    fn test_point_respects_clipping() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.set_clipping(Quad::new(2, 2, 5, 5));
        ctx.point(Point::new(3, 3), 7);
        ctx.point(Point::new(1, 1), 7);
        ctx.point(Point::new(6, 3), 7);
        assert_eq!(ctx.surface().pixel(3, 3), 7);
        assert_eq!(count(ctx.surface(), 7), 1);
    }

    #[test]
    fn test_hline_and_vline_clip_to_region() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.hline(Point::new(-3, 2), 6, 4);
        assert_eq!(painted(ctx.surface(), 4), vec![(0, 2), (1, 2), (2, 2)]);
        ctx.vline(Point::new(5, 6), 5, 3);
        assert_eq!(painted(ctx.surface(), 3), vec![(5, 6), (5, 7)]);
    }

    #[test]
    fn test_zero_length_spans_draw_nothing() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.hline(Point::new(3, 3), 0, 5);
        ctx.vline(Point::new(3, 3), -2, 5);
        assert_eq!(count(ctx.surface(), 5), 0);
    }

    #[test]
    fn test_line_includes_both_endpoints() {
        let mut surface = Surface::new(16, 16).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.line(Point::new(2, 3), Point::new(11, 9), 6);
        assert_eq!(ctx.surface().pixel(2, 3), 6);
        assert_eq!(ctx.surface().pixel(11, 9), 6);
    }

    #[test]
    fn test_line_fully_outside_writes_nothing() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.line(Point::new(-5, 1), Point::new(-1, 6), 6);
        ctx.line(Point::new(0, 10), Point::new(7, 12), 6);
        assert!(ctx.surface().pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_partially_outside_line_clips_to_region() {
        // line (-5,3)-(3,3) over region {0,0,7,7} writes exactly (0,3)..(3,3)
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.line(Point::new(-5, 3), Point::new(3, 3), 5);
        assert_eq!(
            painted(ctx.surface(), 5),
            vec![(0, 3), (1, 3), (2, 3), (3, 3)]
        );
    }

    #[test]
    fn test_polyline_draws_connected_segments() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        let vertices = [Point::new(0, 0), Point::new(3, 0), Point::new(3, 3)];
        ctx.polyline(&vertices, 2);
        // 4 pixels across, 4 down, sharing the corner
        assert_eq!(count(ctx.surface(), 2), 7);
        ctx.polyline(&[Point::new(5, 5)], 2);
        assert_eq!(count(ctx.surface(), 2), 7);
    }

    #[test]
    fn test_fill_rect_intersects_region() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_rect(Rect::new(-2, -2, 4, 4), 9);
        assert_eq!(painted(ctx.surface(), 9), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_fill_rect_covers_whole_surface() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_rect(Rect::new(0, 0, 8, 8), 5);
        assert_eq!(count(ctx.surface(), 5), 64);
    }

    #[test]
    fn test_fill_rect_empty_extent_is_noop() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_rect(Rect::new(2, 2, 0, 5), 5);
        ctx.fill_rect(Rect::new(2, 2, 5, -1), 5);
        assert_eq!(count(ctx.surface(), 5), 0);
    }

    #[test]
    fn test_triangle_invariant_under_vertex_permutation() {
        let a = Point::new(2, 2);
        let b = Point::new(13, 3);
        let c = Point::new(7, 12);
        let orders = [
            [a, b, c],
            [a, c, b],
            [b, a, c],
            [b, c, a],
            [c, a, b],
            [c, b, a],
        ];

        let mut reference: Option<Vec<(i32, i32)>> = None;
        for order in orders {
            let mut surface = Surface::new(16, 16).unwrap();
            let mut ctx = Context::new(&mut surface);
            ctx.fill_triangle(order[0], order[1], order[2], 1);
            let set = painted(ctx.surface(), 1);
            assert!(!set.is_empty());
            match &reference {
                None => reference = Some(set),
                Some(expected) => assert_eq!(&set, expected),
            }
        }
    }

    #[test]
    fn test_adjacent_triangles_partition_shared_edge() {
        let tl = Point::new(2, 2);
        let tr = Point::new(12, 2);
        let br = Point::new(12, 10);
        let bl = Point::new(2, 10);

        let mut surface_a = Surface::new(16, 16).unwrap();
        let mut ctx_a = Context::new(&mut surface_a);
        ctx_a.fill_triangle(tl, tr, br, 1);
        let first = painted(ctx_a.surface(), 1);

        let mut surface_b = Surface::new(16, 16).unwrap();
        let mut ctx_b = Context::new(&mut surface_b);
        ctx_b.fill_triangle(tl, br, bl, 1);
        let second = painted(ctx_b.surface(), 1);

        assert!(!first.is_empty());
        assert!(!second.is_empty());

        // no doubly-drawn pixel anywhere
        for p in &first {
            assert!(!second.contains(p), "pixel {:?} drawn by both", p);
        }
        // no gap strictly inside the quadrilateral
        for y in 3..10 {
            for x in 3..12 {
                let p = (x, y);
                assert!(
                    first.contains(&p) || second.contains(&p),
                    "pixel {:?} missed by both",
                    p
                );
            }
        }
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_triangle(Point::new(1, 1), Point::new(3, 3), Point::new(5, 5), 7);
        assert_eq!(count(ctx.surface(), 7), 0);
    }

    #[test]
    fn test_triangle_clipped_by_region() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.set_clipping(Quad::new(0, 0, 3, 3));
        ctx.fill_triangle(Point::new(-4, -4), Point::new(12, -4), Point::new(4, 12), 7);
        for (x, y) in painted(ctx.surface(), 7) {
            assert!(ctx.clipping().contains(x, y));
        }
        assert!(count(ctx.surface(), 7) > 0);
    }

    #[test]
    fn test_circle_outline_is_octant_symmetric() {
        let mut surface = Surface::new(17, 17).unwrap();
        let mut ctx = Context::new(&mut surface);
        let (cx, cy) = (8, 8);
        ctx.circle(Point::new(cx, cy), 5, 3);
        let set = painted(ctx.surface(), 3);
        assert!(!set.is_empty());
        for (x, y) in &set {
            let (dx, dy) = (x - cx, y - cy);
            for (mx, my) in [
                (dx, dy),
                (-dx, dy),
                (dx, -dy),
                (-dx, -dy),
                (dy, dx),
                (-dy, dx),
                (dy, -dx),
                (-dy, -dx),
            ] {
                assert!(set.contains(&(cx + mx, cy + my)));
            }
        }
    }

    #[test]
    fn test_circle_degenerate_radii() {
        let mut surface = Surface::new(9, 9).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.circle(Point::new(4, 4), 0, 7);
        ctx.circle(Point::new(4, 4), -3, 7);
        assert_eq!(count(ctx.surface(), 7), 0);

        ctx.fill_circle(Point::new(4, 4), -1, 8);
        assert_eq!(count(ctx.surface(), 8), 0);
        ctx.fill_circle(Point::new(4, 4), 0, 8);
        assert_eq!(painted(ctx.surface(), 8), vec![(4, 4)]);
    }

    #[test]
    fn test_fill_circle_covers_outline() {
        let mut outline_surface = Surface::new(17, 17).unwrap();
        let mut outline_ctx = Context::new(&mut outline_surface);
        outline_ctx.circle(Point::new(8, 8), 5, 1);
        let outline = painted(outline_ctx.surface(), 1);

        let mut filled_surface = Surface::new(17, 17).unwrap();
        let mut filled_ctx = Context::new(&mut filled_surface);
        filled_ctx.fill_circle(Point::new(8, 8), 5, 1);
        let filled = painted(filled_ctx.surface(), 1);

        for p in &outline {
            assert!(filled.contains(p));
        }
        assert!(filled.contains(&(8, 8)));
        assert!(filled.len() > outline.len());
    }

    #[test]
    fn test_identity_pipeline_is_baseline() {
        // identity shifting + opaque table behaves as if no pipeline existed
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_rect(Rect::new(1, 1, 3, 3), 5);
        ctx.point(Point::new(0, 0), 12);
        assert_eq!(ctx.surface().pixel(0, 0), 12);
        assert_eq!(count(ctx.surface(), 5), 9);
    }

    #[test]
    fn test_shifting_remaps_written_index() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.set_shifting(5, 9);
        ctx.fill_rect(Rect::new(0, 0, 8, 8), 5);
        assert_eq!(count(ctx.surface(), 9), 64);
        assert_eq!(count(ctx.surface(), 5), 0);
    }

    #[test]
    fn test_transparent_index_is_full_noop() {
        let mut surface = Surface::new(8, 8).unwrap();
        surface.fill(1);
        let before = surface.pixels().to_vec();

        let mut ctx = Context::new(&mut surface);
        ctx.set_transparent(9, true);
        ctx.point(Point::new(1, 1), 9);
        ctx.hline(Point::new(0, 0), 8, 9);
        ctx.vline(Point::new(0, 0), 8, 9);
        ctx.line(Point::new(0, 0), Point::new(7, 7), 9);
        ctx.polyline(&[Point::new(0, 7), Point::new(7, 0)], 9);
        ctx.fill_rect(Rect::new(0, 0, 8, 8), 9);
        ctx.fill_triangle(Point::new(0, 0), Point::new(7, 0), Point::new(3, 7), 9);
        ctx.circle(Point::new(4, 4), 3, 9);
        ctx.fill_circle(Point::new(4, 4), 3, 9);
        // also when the transparency hits after remapping
        ctx.set_shifting(2, 9);
        ctx.fill_rect(Rect::new(0, 0, 8, 8), 2);

        assert_eq!(surface.pixels(), before.as_slice());
    }

    #[test]
    fn test_empty_region_suppresses_all_primitives() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.set_clipping(Quad::new(6, 6, 1, 1));
        ctx.point(Point::new(3, 3), 7);
        ctx.line(Point::new(0, 0), Point::new(7, 7), 7);
        ctx.fill_rect(Rect::new(0, 0, 8, 8), 7);
        ctx.fill_triangle(Point::new(0, 0), Point::new(7, 0), Point::new(3, 7), 7);
        ctx.circle(Point::new(4, 4), 3, 7);
        ctx.fill_circle(Point::new(4, 4), 3, 7);
        assert_eq!(count(ctx.surface(), 7), 0);
    }
}
