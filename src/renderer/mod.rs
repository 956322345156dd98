//! Drawing surface abstraction
//!
//! The particle engine draws through [`Surface`]; on the web the 2D canvas
//! implements it, and tests use a recording surface.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;

/// A filled circle with a soft glow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowCircle<'a> {
    pub center: Vec2,
    pub radius: f32,
    pub color: &'a str,
    /// 0-1
    pub opacity: f32,
    /// Shadow blur radius of the glow pass
    pub blur: f64,
}

/// Something particles can be drawn onto
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);

    /// Draw one glowing circle
    fn fill_glow_circle(&mut self, circle: GlowCircle<'_>);
}
