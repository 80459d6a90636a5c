//! Scanline flood fill

use super::{Context, Point};

impl Context<'_> {
    /// Flood-fill the connected run of pixels sharing the seed's current
    /// index, bounded by the clipping region.
    ///
    /// Explicit seed stack instead of recursion: each popped seed rewinds to
    /// the left end of its matching run, then overwrites the run rightward.
    /// While scanning, the rows above and below are tracked independently:
    /// one new seed is pushed per contiguous vertical run per side, not one
    /// per pixel. A seed outside the region is a no-op, and refilling with
    /// the seed's own color leaves the buffer untouched.
    pub fn flood_fill(&mut self, seed: Point, index: u8) {
        let Some(replacement) = self.resolve(index) else {
            return;
        };
        if !self.clip.contains(seed.x, seed.y) {
            return;
        }

        let matched = self.surface.pixel(seed.x, seed.y);
        if matched == replacement {
            return;
        }

        let clip = self.clip;
        let mut stack = vec![seed];

        while let Some(position) = stack.pop() {
            let y = position.y;

            // rewind to the left end of the matching run
            let mut x = position.x;
            while x >= clip.x0 && self.surface.pixel(x, y) == matched {
                x -= 1;
            }
            x += 1;

            let mut above = false;
            let mut below = false;

            while x <= clip.x1 && self.surface.pixel(x, y) == matched {
                self.surface.set_pixel(x, y, replacement);

                if y > clip.y0 {
                    let neighbor = self.surface.pixel(x, y - 1);
                    if !above && neighbor == matched {
                        stack.push(Point::new(x, y - 1));
                        above = true;
                    } else if above && neighbor != matched {
                        above = false;
                    }
                }

                if y < clip.y1 {
                    let neighbor = self.surface.pixel(x, y + 1);
                    if !below && neighbor == matched {
                        stack.push(Point::new(x, y + 1));
                        below = true;
                    } else if below && neighbor != matched {
                        below = false;
                    }
                }

                x += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Quad, Rect, Surface};

    fn count(surface: &Surface, index: u8) -> usize {
        surface.pixels().iter().filter(|&&p| p == index).count()
    }

    #[test]
    fn test_fill_replaces_whole_uniform_surface() {
        // 8x8 surface painted 5, flood at (4,4) with 9: every byte becomes 9
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_rect(Rect::new(0, 0, 8, 8), 5);
        ctx.flood_fill(Point::new(4, 4), 9);
        assert_eq!(count(ctx.surface(), 9), 64);
    }

    #[test]
    fn test_refill_with_same_color_is_idempotent() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_rect(Rect::new(0, 0, 8, 8), 5);
        let before = ctx.surface().pixels().to_vec();
        ctx.flood_fill(Point::new(4, 4), 5);
        assert_eq!(ctx.surface().pixels(), before.as_slice());
    }

    #[test]
    fn test_seed_outside_region_is_noop() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.set_clipping(Quad::new(2, 2, 5, 5));
        ctx.flood_fill(Point::new(0, 0), 9);
        ctx.flood_fill(Point::new(7, 7), 9);
        assert_eq!(count(ctx.surface(), 9), 0);
    }

    #[test]
    fn test_fill_never_escapes_region() {
        // the matching area covers the whole surface, the region does not
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.set_clipping(Quad::new(2, 2, 5, 5));
        ctx.flood_fill(Point::new(3, 3), 7);
        assert_eq!(count(ctx.surface(), 7), 16);
        for y in 0..8 {
            for x in 0..8 {
                let inside = ctx.clipping().contains(x, y);
                assert_eq!(ctx.surface().pixel(x, y), if inside { 7 } else { 0 });
            }
        }
    }

    #[test]
    fn test_fill_stops_at_boundary_color() {
        // a drawn rectangle outline pens the fill in
        let mut surface = Surface::new(10, 10).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.polyline(
            &[
                Point::new(2, 2),
                Point::new(7, 2),
                Point::new(7, 7),
                Point::new(2, 7),
                Point::new(2, 2),
            ],
            1,
        );
        ctx.flood_fill(Point::new(4, 4), 8);
        // interior is the 4x4 block strictly inside the outline
        assert_eq!(count(ctx.surface(), 8), 16);
        for y in 3..=6 {
            for x in 3..=6 {
                assert_eq!(ctx.surface().pixel(x, y), 8);
            }
        }
        // outside of the outline untouched
        assert_eq!(ctx.surface().pixel(0, 0), 0);
        assert_eq!(ctx.surface().pixel(9, 9), 0);
    }

    #[test]
    fn test_fill_follows_concave_shapes() {
        // a U-shaped cavity: both arms must be reached from one seed
        let mut surface = Surface::new(9, 9).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_rect(Rect::new(0, 0, 9, 9), 1);
        ctx.fill_rect(Rect::new(1, 1, 3, 7), 0);
        ctx.fill_rect(Rect::new(5, 1, 3, 7), 0);
        ctx.fill_rect(Rect::new(1, 6, 7, 2), 0);
        ctx.flood_fill(Point::new(2, 1), 9);
        assert_eq!(count(ctx.surface(), 9), 3 * 7 + 3 * 7 + 14 - 3 * 2 - 3 * 2);
        assert_eq!(ctx.surface().pixel(6, 1), 9); // far arm reached
        assert_eq!(count(ctx.surface(), 0), 0);
    }

    #[test]
    fn test_fill_applies_shifting_and_transparency() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut ctx = Context::new(&mut surface);
        ctx.fill_rect(Rect::new(0, 0, 8, 8), 5);

        // transparency gates the whole call
        ctx.set_transparent(9, true);
        ctx.flood_fill(Point::new(4, 4), 9);
        assert_eq!(count(ctx.surface(), 5), 64);

        // shifting decides the replacement index
        ctx.reset_transparent();
        ctx.set_shifting(9, 3);
        ctx.flood_fill(Point::new(4, 4), 9);
        assert_eq!(count(ctx.surface(), 3), 64);
    }
}
