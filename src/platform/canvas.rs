//! Canvas 2D drawing surface

use std::f64::consts::TAU;

use anyhow::{Context, anyhow};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::field::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("{e:?}"))?
            .context("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("not a 2d context"))?;
        Ok(Self { canvas, ctx })
    }

    /// Set the backing store and scale drawing so callers work in CSS pixels
    pub fn apply_backing(&self, (width, height): (u32, u32), dpr: f32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let dpr = dpr as f64;
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, size: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .ok();
        self.ctx.fill();
    }

    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]) {
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);
        let Ok(grad) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
            return;
        };
        for (offset, color) in stops {
            grad.add_color_stop(*offset, &color.css()).ok();
        }
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.begin_path();
        self.ctx.arc(x, y, r, 0.0, TAU).ok();
        self.ctx.fill();
    }
}
