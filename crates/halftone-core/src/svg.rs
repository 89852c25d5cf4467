use std::fmt::Write as _;

use glam::Vec2;

use crate::field::Viewport;
use crate::marks::RectMark;
use crate::surface::{Rgba, Stroke, Surface};

/// Vector back end that records one frame as a standalone SVG document.
#[derive(Default)]
pub struct SvgSurface {
    buf: String,
    shapes: usize,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &str {
        &self.buf
    }

    pub fn into_document(self) -> String {
        self.buf
    }

    /// Number of shapes written since the last `begin`, background excluded.
    pub fn shape_count(&self) -> usize {
        self.shapes
    }

    fn fill_attrs(color: Rgba) -> String {
        let [r, g, b] = color.to_rgb8();
        if color.a >= 1.0 {
            format!(r#"fill="rgb({r},{g},{b})""#)
        } else {
            format!(
                r#"fill="rgb({r},{g},{b})" fill-opacity="{:.3}""#,
                color.a.max(0.0)
            )
        }
    }
}

impl Surface for SvgSurface {
    fn begin(&mut self, viewport: Viewport, background: Rgba) {
        self.buf.clear();
        self.shapes = 0;
        let (w, h) = (viewport.width, viewport.height);
        _ = writeln!(
            self.buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.2} {h:.2}">"#
        );
        _ = writeln!(
            self.buf,
            r#"<rect x="0" y="0" width="{w:.2}" height="{h:.2}" {}/>"#,
            Self::fill_attrs(background)
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.shapes += 1;
        _ = writeln!(
            self.buf,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}/>"#,
            center.x,
            center.y,
            radius.max(0.0),
            Self::fill_attrs(color)
        );
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.shapes += 1;
        let [r, g, b] = stroke.color.to_rgb8();
        _ = write!(
            self.buf,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="rgb({r},{g},{b})" stroke-opacity="{:.3}" stroke-width="{:.2}""#,
            center.x,
            center.y,
            radius.max(0.0),
            stroke.color.a,
            stroke.width
        );
        if !stroke.dash.is_empty() {
            let dash: Vec<String> = stroke.dash.iter().map(|d| format!("{d:.2}")).collect();
            _ = write!(self.buf, r#" stroke-dasharray="{}""#, dash.join(","));
        }
        self.buf.push_str("/>\n");
    }

    fn fill_rounded_rect(&mut self, rect: &RectMark, color: Rgba) {
        self.shapes += 1;
        let corner = rect.clamped_corner();
        _ = write!(
            self.buf,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{corner:.2}" ry="{corner:.2}" {}"#,
            rect.x,
            rect.y,
            rect.width.max(0.0),
            rect.height.max(0.0),
            Self::fill_attrs(color)
        );
        if rect.is_rotated() {
            let c = rect.center();
            _ = write!(
                self.buf,
                r#" transform="rotate({:.2} {:.2} {:.2})""#,
                rect.rotation_deg, c.x, c.y
            );
        }
        self.buf.push_str("/>\n");
    }

    fn finish(&mut self) {
        self.buf.push_str("</svg>\n");
    }
}
