use anyhow::anyhow;
use glam::DVec2;
use serpent_core::Surface;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `<canvas>` with its 2D context.
pub struct Canvas2d {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("get_context: {:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for Canvas2d {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    // Assigning width/height also resets the context transform and state.
    fn set_size(&mut self, width_px: u32, height_px: u32) {
        self.canvas.set_width(width_px);
        self.canvas.set_height(height_px);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        _ = self.ctx.scale(sx, sy);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: DVec2) {
        self.ctx.move_to(p.x, p.y);
    }

    fn quadratic_curve_to(&mut self, control: DVec2, end: DVec2) {
        self.ctx.quadratic_curve_to(control.x, control.y, end.x, end.y);
    }

    fn line_to(&mut self, p: DVec2) {
        self.ctx.line_to(p.x, p.y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
