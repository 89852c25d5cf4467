use glam::Vec2;

use crate::constants::DEFAULT_VIEW_BOX;
use crate::field::Viewport;

/// A rounded rectangle in view-box or viewport units, turned
/// `rotation_deg` clockwise about its centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectMark {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub corner: f32,
    pub rotation_deg: f32,
}

impl RectMark {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Corner radius limited to half the shorter side.
    pub fn clamped_corner(&self) -> f32 {
        self.corner.min(self.width * 0.5).min(self.height * 0.5).max(0.0)
    }

    /// Grow or shrink about the centre.
    pub fn scaled(&self, factor: f32) -> RectMark {
        let c = self.center();
        let width = self.width * factor;
        let height = self.height * factor;
        RectMark {
            x: c.x - width * 0.5,
            y: c.y - height * 0.5,
            width,
            height,
            corner: self.corner * factor,
            rotation_deg: self.rotation_deg,
        }
    }

    pub fn translated(&self, offset: Vec2) -> RectMark {
        RectMark {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    pub fn rotated(&self, degrees: f32) -> RectMark {
        RectMark {
            rotation_deg: self.rotation_deg + degrees,
            ..*self
        }
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation_deg.rem_euclid(360.0) != 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEW_BOX[0],
            height: DEFAULT_VIEW_BOX[1],
        }
    }
}

/// `cols` x `rows` equal cells separated (and bordered) by `gap`, row-major.
pub fn mark_grid(
    view_box: ViewBox,
    cols: usize,
    rows: usize,
    gap: f32,
    corner: f32,
) -> Vec<RectMark> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }
    let width = (view_box.width - gap * (cols as f32 + 1.0)) / cols as f32;
    let height = (view_box.height - gap * (rows as f32 + 1.0)) / rows as f32;
    if width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let mut marks = Vec::with_capacity(cols * rows);
    for r in 0..rows {
        for c in 0..cols {
            marks.push(RectMark {
                x: gap + c as f32 * (width + gap),
                y: gap + r as f32 * (height + gap),
                width,
                height,
                corner,
                rotation_deg: 0.0,
            });
        }
    }
    marks
}

/// Uniform scale plus centring offset that fits a view box into a viewport,
/// keeping `reserve` units of height free.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl FitTransform {
    pub fn fit(view_box: ViewBox, viewport: Viewport, reserve: f32) -> Self {
        if view_box.width <= 0.0 || view_box.height <= 0.0 {
            return Self {
                scale: 0.0,
                offset: viewport.center(),
            };
        }
        let scale = (viewport.width / view_box.width)
            .min((viewport.height - reserve) / view_box.height)
            .max(0.0);
        let offset = Vec2::new(
            (viewport.width - view_box.width * scale) * 0.5,
            (viewport.height - view_box.height * scale) * 0.5,
        );
        Self { scale, offset }
    }

    pub fn apply_point(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.scale
    }

    pub fn apply(&self, mark: &RectMark) -> RectMark {
        let origin = self.apply_point(Vec2::new(mark.x, mark.y));
        RectMark {
            x: origin.x,
            y: origin.y,
            width: mark.width * self.scale,
            height: mark.height * self.scale,
            corner: mark.corner * self.scale,
            rotation_deg: mark.rotation_deg,
        }
    }
}
