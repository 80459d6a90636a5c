//! Mosaic
//!
//! A random arrangement of chords splits the screen into cells; flood fill
//! then paints one more cell every tick until the board is busy, at which
//! point a fresh arrangement is rolled. Fills re-run from scratch each
//! frame, so a later fill landing in an already-painted cell simply repaints
//! it over the earlier color.

use super::Demo;
use crate::raster::{Context, Point, Rect};
use crate::util::Rng;

const BACKGROUND: u8 = 0;
const WALL: u8 = 7;

const CHORDS: usize = 10;
const MAX_FILLS: usize = 24;
const FILL_INTERVAL: f32 = 0.2;

pub struct Mosaic {
    width: i32,
    height: i32,
    rng: Rng,
    walls: Vec<(Point, Point)>,
    fills: Vec<(Point, u8)>,
    timer: f32,
}

impl Mosaic {
    pub fn new(width: i32, height: i32) -> Self {
        let mut mosaic = Self {
            width,
            height,
            rng: Rng::new(0xd1ce),
            walls: Vec::with_capacity(CHORDS),
            fills: Vec::with_capacity(MAX_FILLS),
            timer: 0.0,
        };
        mosaic.reroll();
        mosaic
    }

    /// Roll a new wall arrangement and drop all queued fills
    fn reroll(&mut self) {
        self.walls.clear();
        self.fills.clear();

        for _ in 0..CHORDS {
            // chords run edge to edge so every cell is fully enclosed
            let (from, to) = if self.rng.next_f32() < 0.5 {
                (
                    Point::new(self.rng.range_i32(0, self.width - 1), 0),
                    Point::new(self.rng.range_i32(0, self.width - 1), self.height - 1),
                )
            } else {
                (
                    Point::new(0, self.rng.range_i32(0, self.height - 1)),
                    Point::new(self.width - 1, self.rng.range_i32(0, self.height - 1)),
                )
            };
            self.walls.push((from, to));
        }
    }
}

impl Demo for Mosaic {
    fn update(&mut self, dt: f32, _width: i32, _height: i32) {
        self.timer += dt;
        if self.timer < FILL_INTERVAL {
            return;
        }
        self.timer = 0.0;

        if self.fills.len() >= MAX_FILLS {
            self.reroll();
            return;
        }

        let seed = Point::new(
            self.rng.range_i32(1, self.width - 2),
            self.rng.range_i32(1, self.height - 2),
        );
        let color = 16 + self.rng.range_i32(0, 215) as u8;
        self.fills.push((seed, color));
    }

    fn render(&self, ctx: &mut Context) {
        ctx.fill_rect(Rect::new(0, 0, self.width, self.height), BACKGROUND);

        ctx.polyline(
            &[
                Point::new(0, 0),
                Point::new(self.width - 1, 0),
                Point::new(self.width - 1, self.height - 1),
                Point::new(0, self.height - 1),
                Point::new(0, 0),
            ],
            WALL,
        );
        for (from, to) in &self.walls {
            ctx.line(*from, *to, WALL);
        }

        for (seed, color) in &self.fills {
            ctx.flood_fill(*seed, *color);
        }
    }

    fn name(&self) -> &str {
        "Mosaic"
    }
}
