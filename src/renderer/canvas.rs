//! Canvas 2D render sink

use glam::Vec2;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

use super::{RenderSink, Style};

pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSink {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Fill then stroke the current path with the style's paints
    fn paint(&self, style: Style) {
        self.ctx.set_global_alpha(style.alpha as f64);
        if let Some(fill) = style.fill {
            self.ctx.set_fill_style_str(fill.css());
            self.ctx.fill();
        }
        if let Some(stroke) = style.stroke {
            self.ctx.set_stroke_style_str(stroke.css());
            self.ctx.stroke();
        }
        self.ctx.set_global_alpha(1.0);
    }
}

impl RenderSink for CanvasSink {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn circle(&mut self, center: Vec2, radius: f32, style: Style) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.paint(style);
        self.ctx.close_path();
    }

    fn rect(&mut self, center: Vec2, half_extent: f32, style: Style) {
        let size = 2.0 * half_extent as f64;
        self.ctx.begin_path();
        self.ctx.rect(
            (center.x - half_extent) as f64,
            (center.y - half_extent) as f64,
            size,
            size,
        );
        self.paint(style);
        self.ctx.close_path();
    }

    fn line(&mut self, from: Vec2, to: Vec2, style: Style) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.paint(Style { fill: None, ..style });
        self.ctx.close_path();
    }
}
