//! Dashed rings that visualise each focal point's outgoing wavefronts.

use smallvec::SmallVec;

use crate::constants::*;
use crate::focal::FocalPoint;
use crate::surface::{Rgba, Stroke, Surface};

/// Radii of the visible rings for a point that has been running `elapsed_sec`.
///
/// Ring `j` is offset by `j / RINGS_PER_POINT` of a cycle. A ring is hidden
/// until it starts expanding and once it passes [`RING_PHASE_CUTOFF`] of the
/// horizon. The modulo keeps the sign of a negative elapsed time, which hides
/// those rings too.
pub fn ring_radii(
    elapsed_sec: f64,
    frequency: f32,
    max_radius: f32,
) -> SmallVec<[f32; RINGS_PER_POINT]> {
    let mut radii = SmallVec::new();
    for j in 0..RINGS_PER_POINT {
        let phase =
            ((elapsed_sec * frequency as f64 + j as f64 / RINGS_PER_POINT as f64) % 1.0) as f32;
        if phase > 0.0 && phase < RING_PHASE_CUTOFF {
            radii.push(phase * max_radius);
        }
    }
    radii
}

pub fn overlay_color() -> Rgba {
    Rgba::WHITE.with_alpha(OVERLAY_ALPHA)
}

/// Draw the indicator and wavefront rings for every point.
pub fn draw_overlay<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[FocalPoint],
    now_sec: f64,
    max_radius: f32,
) {
    let indicator = Stroke::solid(overlay_color(), 1.0);
    let ring = Stroke::dashed(overlay_color(), 1.0, &RING_DASH);
    for point in points {
        surface.stroke_circle(point.position, INDICATOR_RADIUS, &indicator);
        for radius in ring_radii(point.elapsed(now_sec), point.frequency, max_radius) {
            surface.stroke_circle(point.position, radius, &ring);
        }
    }
}
