//! Test card
//!
//! Calibration-style still image that runs every primitive at least once per
//! frame. The color bars are drawn with fixed logical indices and recolored
//! purely through the shifting table, so the cycling costs no geometry.

use super::Demo;
use crate::raster::{Context, Point, Rect};

// Bright half of the VGA base row, used for the rotating bars
const BAR_COLORS: [u8; 8] = [9, 10, 11, 12, 13, 14, 15, 7];

const BACKGROUND: u8 = 0;
const BORDER: u8 = 15;
const CROSSHAIR: u8 = 8;
const BULLSEYE_OUTER: u8 = 4;
const BULLSEYE_INNER: u8 = 14;
const WEDGE: u8 = 1;
const SWEEP: u8 = 10;

pub struct Testcard {
    time: f32,
}

impl Testcard {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }
}

impl Default for Testcard {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for Testcard {
    fn update(&mut self, dt: f32, _width: i32, _height: i32) {
        self.time += dt;
    }

    fn render(&self, ctx: &mut Context) {
        let width = ctx.width();
        let height = ctx.height();

        ctx.fill_rect(Rect::new(0, 0, width, height), BACKGROUND);

        // Rotate the bar colors once per second without touching geometry
        let rotation = self.time as usize % BAR_COLORS.len();
        for (i, &slot) in BAR_COLORS.iter().enumerate() {
            ctx.set_shifting(slot, BAR_COLORS[(i + rotation) % BAR_COLORS.len()]);
        }

        let bar_width = width / BAR_COLORS.len() as i32;
        let bar_height = height * 2 / 3;
        for (i, &slot) in BAR_COLORS.iter().enumerate() {
            let x = i as i32 * bar_width;
            let w = if i == BAR_COLORS.len() - 1 {
                width - x // last bar fills the remainder
            } else {
                bar_width
            };
            ctx.fill_rect(Rect::new(x, 0, w, bar_height), slot);
        }
        ctx.reset_shifting();

        // Bullseye in the lower half
        let center = Point::new(width / 2, bar_height + (height - bar_height) / 2);
        let radius = (height - bar_height) * 2 / 5;
        ctx.fill_circle(center, radius, BULLSEYE_OUTER);
        ctx.fill_circle(center, radius / 2, BULLSEYE_INNER);
        ctx.circle(center, radius, BORDER);
        ctx.circle(center, radius * 2 / 3, BORDER);

        // Corner wedges
        let wedge = width.min(height) / 6;
        ctx.fill_triangle(
            Point::new(0, 0),
            Point::new(wedge, 0),
            Point::new(0, wedge),
            WEDGE,
        );
        ctx.fill_triangle(
            Point::new(width - 1, height - 1),
            Point::new(width - 1 - wedge, height - 1),
            Point::new(width - 1, height - 1 - wedge),
            WEDGE,
        );

        // Crosshair and border
        ctx.hline(Point::new(0, height / 2), width, CROSSHAIR);
        ctx.vline(Point::new(width / 2, 0), height, CROSSHAIR);
        ctx.polyline(
            &[
                Point::new(0, 0),
                Point::new(width - 1, 0),
                Point::new(width - 1, height - 1),
                Point::new(0, height - 1),
                Point::new(0, 0),
            ],
            BORDER,
        );

        // Sweep line, deliberately overshooting so it exercises the clipper
        let angle = self.time * 0.9;
        let reach = (width + height) as f32;
        let tip = Point::new(
            center.x + (angle.cos() * reach) as i32,
            center.y + (angle.sin() * reach) as i32,
        );
        ctx.line(center, tip, SWEEP);
    }

    fn name(&self) -> &str {
        "Test Card"
    }
}
