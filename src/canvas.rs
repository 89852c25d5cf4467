use std::f64::consts::TAU;

use glam::Vec2;
use halftone_core::{RectMark, Rgba, Stroke, Surface, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Canvas 2D back end. Scenes draw in CSS pixels; the context transform maps
/// them onto the device-pixel backing store.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    dpr: f64,
    solid: js_sys::Array,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            ctx,
            dpr: 1.0,
            solid: js_sys::Array::new(),
        })
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            TAU,
        );
    }
}

impl Surface for CanvasSurface {
    fn begin(&mut self, viewport: Viewport, background: Rgba) {
        _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        self.ctx.set_fill_style_str(&background.css());
        self.ctx
            .fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(&stroke.color.css());
        self.ctx.set_line_width(stroke.width as f64);
        if stroke.dash.is_empty() {
            _ = self.ctx.set_line_dash(&self.solid);
        } else {
            let dash: js_sys::Array = stroke
                .dash
                .iter()
                .map(|d| JsValue::from_f64(*d as f64))
                .collect();
            _ = self.ctx.set_line_dash(&dash);
        }
        self.ctx.stroke();
    }

    fn fill_rounded_rect(&mut self, rect: &RectMark, color: Rgba) {
        let (w, h) = (rect.width.max(0.0) as f64, rect.height.max(0.0) as f64);
        let r = rect.clamped_corner() as f64;
        let ctx = &self.ctx;
        let rotated = rect.is_rotated();
        // Rotated marks are traced around the origin of a centred frame.
        let (x, y) = if rotated {
            let c = rect.center();
            ctx.save();
            _ = ctx.translate(c.x as f64, c.y as f64);
            _ = ctx.rotate((rect.rotation_deg as f64).to_radians());
            (-w * 0.5, -h * 0.5)
        } else {
            (rect.x as f64, rect.y as f64)
        };
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.line_to(x + w - r, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        ctx.line_to(x + w, y + h - r);
        ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        ctx.line_to(x + r, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        ctx.line_to(x, y + r);
        ctx.quadratic_curve_to(x, y, x + r, y);
        ctx.close_path();
        ctx.set_fill_style_str(&color.css());
        ctx.fill();
        if rotated {
            ctx.restore();
        }
    }
}
