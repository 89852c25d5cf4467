//! The wave field: a pure function of (point, time, focal points) to dot intensity.
//!
//! Every focal point emits a radially expanding sine wave. Its phase at a query
//! point lags by `distance / speed`, and its amplitude falls off linearly to zero
//! at the attenuation horizon (a fraction of the viewport's shorter side). The
//! contributions are summed, boosted, clamped to one and scaled to
//! [`MAX_INTENSITY`].

use std::f64::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{CoreError, CoreResult};
use crate::focal::FocalPoint;
use crate::surface::Rgba;

/// Host-supplied drawing area in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height).max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Tunables for the field scene. Defaults reproduce the stock display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub dot_spacing: f32,
    pub wave_speed: f32,
    pub horizon_fraction: f32,
    pub gain: f32,
    pub spawn_interval_sec: f64,
    pub spawn_probability: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            dot_spacing: DOT_SPACING,
            wave_speed: WAVE_SPEED,
            horizon_fraction: HORIZON_FRACTION,
            gain: FIELD_GAIN,
            spawn_interval_sec: SPAWN_INTERVAL_SEC,
            spawn_probability: SPAWN_PROBABILITY,
        }
    }
}

impl FieldParams {
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.dot_spacing > 0.0) {
            return Err(CoreError::params("dot_spacing must be positive"));
        }
        if !(self.wave_speed > 0.0) {
            return Err(CoreError::params("wave_speed must be positive"));
        }
        if !(self.horizon_fraction > 0.0) {
            return Err(CoreError::params("horizon_fraction must be positive"));
        }
        if !(self.gain > 0.0) {
            return Err(CoreError::params("gain must be positive"));
        }
        if !(self.spawn_interval_sec > 0.0) {
            return Err(CoreError::params("spawn_interval_sec must be positive"));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(CoreError::params("spawn_probability must be within [0, 1]"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct WaveField {
    wave_speed: f32,
    horizon_fraction: f32,
    gain: f32,
    max_dimension: f32,
}

impl WaveField {
    pub fn new(viewport: Viewport, params: &FieldParams) -> Self {
        let mut field = Self {
            wave_speed: params.wave_speed,
            horizon_fraction: params.horizon_fraction,
            gain: params.gain,
            max_dimension: 0.0,
        };
        field.resize(viewport);
        field
    }

    /// Recompute the attenuation horizon for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.max_dimension = viewport.min_side() * self.horizon_fraction;
    }

    pub fn max_dimension(&self) -> f32 {
        self.max_dimension
    }

    /// Linear falloff, one at the focal point and zero from the horizon outwards.
    pub fn attenuation(&self, distance: f32) -> f32 {
        if self.max_dimension <= 0.0 {
            return 0.0;
        }
        (1.0 - distance / self.max_dimension).max(0.0)
    }

    /// A single focal point's share of the field at `p`, in [0, intensity].
    pub fn contribution(&self, p: Vec2, now_sec: f64, point: &FocalPoint) -> f32 {
        let distance = p.distance(point.position);
        let attenuation = self.attenuation(distance);
        if attenuation == 0.0 {
            return 0.0;
        }
        let elapsed = now_sec - point.start_time_sec;
        let phase = elapsed * point.frequency as f64 - (distance / self.wave_speed) as f64;
        let wave = (phase * TAU).sin() * 0.5 + 0.5;
        wave as f32 * attenuation * point.intensity
    }

    /// Intensity in [0, MAX_INTENSITY] for a dot at `p`.
    pub fn intensity(&self, p: Vec2, now_sec: f64, points: &[FocalPoint]) -> f32 {
        if points.is_empty() {
            return 0.0;
        }
        let total: f32 = points
            .iter()
            .map(|point| self.contribution(p, now_sec, point))
            .sum();
        (total * self.gain).min(1.0) * MAX_INTENSITY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Bright,
    Dim,
}

impl Tone {
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        match self {
            Tone::Bright => Rgba::from_rgb8(255, 255, 255, alpha),
            Tone::Dim => Rgba::from_rgb8(128, 128, 128, alpha),
        }
    }
}

/// How a renderer should draw one dot for a given kernel output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotStyle {
    pub radius: f32,
    pub opacity: f32,
    pub tone: Tone,
}

impl DotStyle {
    pub fn from_intensity(base_size: f32, intensity: f32) -> Self {
        let opacity = if intensity > VISIBLE_THRESHOLD {
            (intensity * OPACITY_PER_UNIT).min(1.0)
        } else {
            FLOOR_OPACITY
        };
        let tone = if intensity > BRIGHT_THRESHOLD {
            Tone::Bright
        } else {
            Tone::Dim
        };
        Self {
            radius: base_size + intensity,
            opacity,
            tone,
        }
    }

    pub fn color(&self) -> Rgba {
        self.tone.with_alpha(self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_horizon_attenuates_everything() {
        let field = WaveField::new(Viewport::new(0.0, 500.0), &FieldParams::default());
        assert_eq!(field.max_dimension(), 0.0);
        assert_eq!(field.attenuation(0.0), 0.0);
        assert_eq!(field.attenuation(10.0), 0.0);
    }

    #[test]
    fn params_reject_out_of_range_probability() {
        let params = FieldParams {
            spawn_probability: 1.5,
            ..FieldParams::default()
        };
        assert!(params.validate().is_err());
        assert!(FieldParams::default().validate().is_ok());
    }
}
