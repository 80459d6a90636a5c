mod mosaic;
mod orbits;
mod testcard;

pub use mosaic::Mosaic;
pub use orbits::Orbits;
pub use testcard::Testcard;

use crate::raster::Context;

/// Trait for all palette-indexed demo scenes.
///
/// The main loop resets the context's clipping region and color pipeline
/// before every `render`, so a demo sets up exactly the state it needs and
/// never has to clean up after itself.
pub trait Demo {
    /// Update demo state (called each frame)
    /// - dt: delta time in seconds
    /// - width/height: surface dimensions
    fn update(&mut self, dt: f32, width: i32, height: i32);

    /// Render the demo through the drawing context
    fn render(&self, ctx: &mut Context);

    /// Demo name for the window title and controls listing
    fn name(&self) -> &str;
}
