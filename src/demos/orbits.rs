//! Orbits
//!
//! Bodies circling a pulsing sun inside a letterboxed clip region. Trails
//! are polylines over analytically-computed past positions, the ship is a
//! triangle whose winding flips as it turns, and the corona ring blinks by
//! toggling its index in the transparency table.

use super::Demo;
use crate::raster::{Context, Point, Quad, Rect};
use crate::util::Rng;

const BACKGROUND: u8 = 0;
const STAR: u8 = 8;
const SUN: u8 = 14;
const CORONA: u8 = 12;
const SHIP: u8 = 15;
const FRAME: u8 = 7;

const INSET: i32 = 12;
const TRAIL_STEPS: usize = 24;
const TRAIL_SPACING: f32 = 0.05;

struct Body {
    orbit: f32,
    speed: f32,
    phase: f32,
    size: i32,
    color: u8,
}

pub struct Orbits {
    time: f32,
    stars: Vec<Point>,
    bodies: Vec<Body>,
}

impl Orbits {
    pub fn new(width: i32, height: i32) -> Self {
        let mut rng = Rng::new(0x7e55e7a);

        let stars = (0..90)
            .map(|_| {
                Point::new(
                    rng.range_i32(INSET, width - INSET - 1),
                    rng.range_i32(INSET, height - INSET - 1),
                )
            })
            .collect();

        let max_orbit = (width.min(height) / 2 - INSET * 2) as f32;
        let bodies = (0..5)
            .map(|i| Body {
                orbit: max_orbit * (0.35 + 0.16 * i as f32),
                speed: rng.range_f32(0.4, 1.3) * if i % 2 == 0 { 1.0 } else { -1.0 },
                phase: rng.range_f32(0.0, std::f32::consts::TAU),
                size: rng.range_i32(3, 9),
                color: 16 + (i as u8 * 43) % 216,
            })
            .collect();

        Self {
            time: 0.0,
            stars,
            bodies,
        }
    }

    fn body_position(&self, body: &Body, center: Point, at: f32) -> Point {
        let angle = body.phase + body.speed * at;
        Point::new(
            center.x + (angle.cos() * body.orbit) as i32,
            center.y + (angle.sin() * body.orbit * 0.6) as i32,
        )
    }
}

impl Demo for Orbits {
    fn update(&mut self, dt: f32, _width: i32, _height: i32) {
        self.time += dt;
    }

    fn render(&self, ctx: &mut Context) {
        let width = ctx.width();
        let height = ctx.height();
        let center = Point::new(width / 2, height / 2);

        ctx.fill_rect(Rect::new(0, 0, width, height), BACKGROUND);
        ctx.polyline(
            &[
                Point::new(INSET - 1, INSET - 1),
                Point::new(width - INSET, INSET - 1),
                Point::new(width - INSET, height - INSET),
                Point::new(INSET - 1, height - INSET),
                Point::new(INSET - 1, INSET - 1),
            ],
            FRAME,
        );

        // Everything inside the frame is letterboxed by the clip region;
        // orbits and trails overshoot it freely.
        ctx.set_clipping(Quad::new(INSET, INSET, width - INSET - 1, height - INSET - 1));

        for star in &self.stars {
            ctx.point(*star, STAR);
        }

        // Pulsing sun; the corona blinks via the transparency table alone
        let pulse = (self.time * 2.0).sin();
        ctx.fill_circle(center, 14 + (pulse * 3.0) as i32, SUN);
        ctx.set_transparent(CORONA, pulse < 0.0);
        ctx.circle(center, 22, CORONA);

        for body in &self.bodies {
            let mut trail = Vec::with_capacity(TRAIL_STEPS);
            for step in (0..TRAIL_STEPS).rev() {
                let at = self.time - step as f32 * TRAIL_SPACING;
                trail.push(self.body_position(body, center, at));
            }
            ctx.polyline(&trail, body.color);
            ctx.fill_circle(self.body_position(body, center, self.time), body.size, body.color);
        }

        // Ship: a triangle oriented along its path, winding flips freely
        let ship_angle = self.time * 0.7;
        let orbit = (width.min(height) / 2 - INSET) as f32;
        let cx = center.x as f32 + ship_angle.cos() * orbit;
        let cy = center.y as f32 + ship_angle.sin() * orbit * 0.8;
        let heading = ship_angle + std::f32::consts::FRAC_PI_2;
        let nose = Point::new(
            (cx + heading.cos() * 10.0) as i32,
            (cy + heading.sin() * 10.0) as i32,
        );
        let left = Point::new(
            (cx + (heading + 2.5).cos() * 7.0) as i32,
            (cy + (heading + 2.5).sin() * 7.0) as i32,
        );
        let right = Point::new(
            (cx + (heading - 2.5).cos() * 7.0) as i32,
            (cy + (heading - 2.5).sin() * 7.0) as i32,
        );
        ctx.fill_triangle(nose, left, right, SHIP);
    }

    fn name(&self) -> &str {
        "Orbits"
    }
}
