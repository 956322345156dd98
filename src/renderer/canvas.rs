//! 2D canvas renderer

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{GlowCircle, Surface};

/// Full-viewport canvas with its 2D context
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap `canvas`. Returns None when no 2D context is available.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the window
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }
}

impl Surface for CanvasRenderer {
    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_glow_circle(&mut self, circle: GlowCircle<'_>) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(circle.opacity as f64);
        ctx.set_fill_style_str(circle.color);

        ctx.begin_path();
        let _ = ctx.arc(
            circle.center.x as f64,
            circle.center.y as f64,
            circle.radius as f64,
            0.0,
            TAU,
        );
        ctx.fill();

        // Glow pass
        ctx.set_shadow_color(circle.color);
        ctx.set_shadow_blur(circle.blur);
        ctx.fill();

        ctx.restore();
    }
}
