//! Minimal 2D drawing surface the engines render onto.
//!
//! The browser implementation wraps `CanvasRenderingContext2d`; tests use
//! [`Recording`], which keeps the draw calls in order.

use glam::DVec2;

pub trait Surface {
    /// Backing width in device pixels.
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_size(&mut self, width_px: u32, height_px: u32);

    /// Multiply the current transform; reset by [`Surface::set_size`].
    fn scale(&mut self, sx: f64, sy: f64);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: DVec2);
    fn quadratic_curve_to(&mut self, control: DVec2, end: DVec2);
    fn line_to(&mut self, p: DVec2);
    fn stroke(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    SetSize(u32, u32),
    Scale(f64, f64),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    FillRect(f64, f64, f64, f64),
    ClearRect(f64, f64, f64, f64),
    BeginPath,
    MoveTo(DVec2),
    QuadTo(DVec2, DVec2),
    LineTo(DVec2),
    Stroke,
}

/// In-memory surface recording every call.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl Recording {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Top-left corners of every 1x1 mark, in call order.
    pub fn dots(&self) -> Vec<DVec2> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::FillRect(x, y, w, h) if w == 1.0 && h == 1.0 => Some(DVec2::new(x, y)),
                _ => None,
            })
            .collect()
    }

    /// Points a stroked path passes through: the move target, every curve
    /// end point and line target.
    pub fn path_points(&self) -> Vec<DVec2> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::MoveTo(p) | DrawOp::LineTo(p) | DrawOp::QuadTo(_, p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recording {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width_px: u32, height_px: u32) {
        self.width = width_px;
        self.height = height_px;
        self.ops.push(DrawOp::SetSize(width_px, height_px));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ops.push(DrawOp::Scale(sx, sy));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ops.push(DrawOp::FillStyle(color.to_string()));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ops.push(DrawOp::StrokeStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect(x, y, w, h));
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::ClearRect(x, y, w, h));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, p: DVec2) {
        self.ops.push(DrawOp::MoveTo(p));
    }

    fn quadratic_curve_to(&mut self, control: DVec2, end: DVec2) {
        self.ops.push(DrawOp::QuadTo(control, end));
    }

    fn line_to(&mut self, p: DVec2) {
        self.ops.push(DrawOp::LineTo(p));
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }
}
