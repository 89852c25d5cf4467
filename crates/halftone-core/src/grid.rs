use glam::Vec2;
use rand::prelude::*;

use crate::constants::{DOT_JITTER_FRACTION, DOT_MIN_SIZE, DOT_SIZE_SPAN};
use crate::field::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub position: Vec2,
    pub size: f32,
}

/// Jittered halftone grid covering the viewport plus one extra row and column.
///
/// Columns are emitted outermost, so dots are ordered x-major.
pub fn dot_grid<R: Rng + ?Sized>(viewport: Viewport, spacing: f32, rng: &mut R) -> Vec<Dot> {
    if viewport.is_empty() || spacing <= 0.0 {
        return Vec::new();
    }
    let cols = ((viewport.width + spacing) / spacing).floor() as usize + 1;
    let rows = ((viewport.height + spacing) / spacing).floor() as usize + 1;
    let jitter = spacing * DOT_JITTER_FRACTION;
    let mut dots = Vec::with_capacity(cols * rows);
    for c in 0..cols {
        let x = c as f32 * spacing;
        for r in 0..rows {
            let y = r as f32 * spacing;
            let jx = x + (rng.gen::<f32>() * jitter * 2.0 - jitter);
            let jy = y + (rng.gen::<f32>() * jitter * 2.0 - jitter);
            dots.push(Dot {
                position: Vec2::new(jx, jy),
                size: DOT_MIN_SIZE + rng.gen::<f32>() * DOT_SIZE_SPAN,
            });
        }
    }
    dots
}
