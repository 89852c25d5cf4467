//! Keyframed opacity, scale, rotation and offset timelines for the
//! rectangle marks, and the rotation between patterns.
//!
//! Element `i` of a pattern runs the same timeline as element 0, shifted by
//! `i * delay_sec`, which is what produces the sweeping look across the marks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::ease::Ease;
use crate::error::{CoreError, CoreResult};
use crate::surface::Rgba;

/// Values visited at equal steps of a cycle, interpolated in between.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyframes(Vec<f32>);

impl Keyframes {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self(values.into())
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Value at `progress` in [0, 1]; each segment's local progress goes through `ease`.
    pub fn sample(&self, progress: f32, ease: Ease) -> f32 {
        let values = match self.0.as_slice() {
            [] => return 1.0,
            [only] => return *only,
            values => values,
        };
        let steps = values.len() - 1;
        let step = 1.0 / steps as f32;
        let progress = progress.clamp(0.0, 1.0);
        let mut i = (progress / step).floor() as usize;
        if i >= steps {
            i = steps - 1;
        }
        let local = (progress - i as f32 * step) / step;
        let (start, end) = (values[i], values[i + 1]);
        start + (end - start) * ease.apply(local)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkStyle {
    pub opacity: f32,
    pub scale: f32,
    pub rotation_deg: f32,
    /// Translation in view-box units.
    pub offset: Vec2,
}

/// One mark animation. Channels other than opacity are optional; JSON also
/// accepts the short `rotate`/`x`/`y` names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pattern {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub opacity: Keyframes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Keyframes>,
    #[serde(default, alias = "rotate", skip_serializing_if = "Option::is_none")]
    pub rotate_deg: Option<Keyframes>,
    #[serde(default, alias = "x", skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<Keyframes>,
    #[serde(default, alias = "y", skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<Keyframes>,
    pub duration_sec: f32,
    pub delay_sec: f32,
    #[serde(default)]
    pub ease: Ease,
}

impl Pattern {
    pub fn new(
        name: &str,
        description: &str,
        opacity: &[f32],
        duration_sec: f32,
        delay_sec: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            opacity: Keyframes::new(opacity),
            scale: None,
            rotate_deg: None,
            offset_x: None,
            offset_y: None,
            duration_sec,
            delay_sec,
            ease: Ease::Linear,
        }
    }

    pub fn with_scale(mut self, scale: &[f32]) -> Self {
        self.scale = Some(Keyframes::new(scale));
        self
    }

    pub fn with_rotation(mut self, degrees: &[f32]) -> Self {
        self.rotate_deg = Some(Keyframes::new(degrees));
        self
    }

    pub fn with_offset(mut self, x: Option<&[f32]>, y: Option<&[f32]>) -> Self {
        self.offset_x = x.map(Keyframes::new);
        self.offset_y = y.map(Keyframes::new);
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Position of element `index` within its cycle at `now_sec`, in [0, 1).
    pub fn progress(&self, index: usize, now_sec: f64) -> f32 {
        let cycle = self.duration_sec as f64;
        if cycle <= 0.0 {
            return 0.0;
        }
        let shifted = now_sec + index as f64 * self.delay_sec as f64;
        (shifted.rem_euclid(cycle) / cycle) as f32
    }

    pub fn opacity_at(&self, index: usize, now_sec: f64) -> f32 {
        self.opacity.sample(self.progress(index, now_sec), self.ease)
    }

    fn channel_at(&self, channel: &Option<Keyframes>, progress: f32, rest: f32) -> f32 {
        channel
            .as_ref()
            .map_or(rest, |k| k.sample(progress, self.ease))
    }

    pub fn scale_at(&self, index: usize, now_sec: f64) -> f32 {
        self.channel_at(&self.scale, self.progress(index, now_sec), 1.0)
    }

    pub fn style_at(&self, index: usize, now_sec: f64) -> MarkStyle {
        let progress = self.progress(index, now_sec);
        MarkStyle {
            opacity: self.opacity.sample(progress, self.ease),
            scale: self.channel_at(&self.scale, progress, 1.0),
            rotation_deg: self.channel_at(&self.rotate_deg, progress, 0.0),
            offset: Vec2::new(
                self.channel_at(&self.offset_x, progress, 0.0),
                self.channel_at(&self.offset_y, progress, 0.0),
            ),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        let fail = |reason: &str| Err(CoreError::pattern(&self.name, reason));
        if !(self.duration_sec > 0.0) {
            return fail("duration must be positive");
        }
        if !(self.delay_sec >= 0.0) {
            return fail("delay must not be negative");
        }
        if self.opacity.values().len() < 2 {
            return fail("opacity needs at least two keyframes");
        }
        if self.opacity.values().iter().any(|v| !(0.0..=1.0).contains(v)) {
            return fail("opacity keyframes must lie within [0, 1]");
        }
        if let Some(scale) = &self.scale {
            if scale.values().len() < 2 {
                return fail("scale needs at least two keyframes");
            }
            if scale.values().iter().any(|v| !(*v > 0.0)) {
                return fail("scale keyframes must be positive");
            }
        }
        for (channel, label) in [
            (&self.rotate_deg, "rotate"),
            (&self.offset_x, "x"),
            (&self.offset_y, "y"),
        ] {
            if let Some(k) = channel {
                if k.values().len() < 2 {
                    return fail(&format!("{label} needs at least two keyframes"));
                }
                if k.values().iter().any(|v| !v.is_finite()) {
                    return fail(&format!("{label} keyframes must be finite"));
                }
            }
        }
        Ok(())
    }

    pub fn nudge_duration(&mut self, delta_sec: f32) {
        self.duration_sec =
            (self.duration_sec + delta_sec).clamp(DURATION_RANGE_SEC.0, DURATION_RANGE_SEC.1);
    }

    pub fn nudge_delay(&mut self, delta_sec: f32) {
        self.delay_sec = (self.delay_sec + delta_sec).clamp(DELAY_RANGE_SEC.0, DELAY_RANGE_SEC.1);
    }
}

/// The slideshow set: five canvas patterns followed by the moving ones from
/// [`tuned_patterns`] that have no canvas counterpart.
pub fn default_patterns() -> Vec<Pattern> {
    let mut patterns = vec![
        Pattern::new("sequential", "Fade in/out sequentially", &[1.0, 0.2, 1.0], 1.0, 0.005),
        Pattern::new("pulse", "Pulse all elements together", &[1.0, 0.7, 1.0], 2.0, 0.003)
            .with_scale(&[1.0, 1.1, 1.0]),
        Pattern::new(
            "pulse-individual",
            "Pulse each element on its own beat",
            &[1.0, 0.3, 1.0],
            1.5,
            0.004,
        ),
        Pattern::new("wave", "Wave sweeping across the marks", &[1.0, 0.2, 1.0], 2.5, 0.002),
        Pattern::new("fade", "Slow uneven fade", &[1.0, 0.4, 0.8, 1.0], 2.0, 0.003),
    ];
    patterns.extend(
        tuned_patterns()
            .into_iter()
            .filter(|p| matches!(p.name.as_str(), "spiral" | "bounce" | "random")),
    );
    patterns
}

/// The editable set with sine/bounce eases and transform channels. Each
/// channel goes out and back within one cycle.
pub fn tuned_patterns() -> Vec<Pattern> {
    vec![
        Pattern::new("sequential", "Fade in/out sequentially", &[1.0, 0.2, 1.0], 0.8, 0.002)
            .with_scale(&[1.0, 0.8, 1.0])
            .with_ease(Ease::SineInOut),
        Pattern::new("pulse", "Pulse all elements together", &[1.0, 0.4, 1.0], 1.0, 0.001)
            .with_scale(&[1.0, 1.2, 1.0])
            .with_ease(Ease::SineInOut),
        Pattern::new("wave", "Wave effect from left to right", &[1.0, 0.2, 1.0], 1.2, 0.001)
            .with_scale(&[1.0, 0.9, 1.0])
            .with_offset(Some(&[0.0, 10.0, 0.0]), None)
            .with_ease(Ease::SineInOut),
        Pattern::new("spiral", "Spiral rotation effect", &[1.0, 0.3, 1.0], 2.0, 0.002)
            .with_rotation(&[0.0, 360.0])
            .with_scale(&[1.0, 0.7, 1.0])
            .with_ease(Ease::SineInOut),
        Pattern::new("bounce", "Bounce effect", &[1.0, 0.5, 1.0], 0.8, 0.001)
            .with_offset(None, Some(&[0.0, -20.0, 0.0]))
            .with_scale(&[1.0, 1.1, 1.0])
            .with_ease(Ease::BounceOut),
        Pattern::new("random", "Random movement", &[1.0, 0.4, 1.0], 1.5, 0.003)
            .with_offset(Some(&[0.0, 15.0, 0.0]), Some(&[0.0, 15.0, 0.0]))
            .with_rotation(&[0.0, 45.0, 0.0])
            .with_ease(Ease::SineInOut),
    ]
}

/// Ink and paper colours; they swap on every theme interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub background: Rgba,
    pub ink: Rgba,
}

impl Theme {
    pub fn new(inverted: bool) -> Self {
        let paper = Rgba::WHITE;
        let ink = Rgba::from_rgb8(0x2a, 0x2a, 0x2a, 1.0);
        if inverted {
            Self {
                background: ink,
                ink: paper,
            }
        } else {
            Self {
                background: paper,
                ink,
            }
        }
    }
}

/// Rotates through a pattern list on a fixed interval.
///
/// The active index is derived from wall time since `origin_sec`, plus any
/// manual skips, so it is the same however often frames are drawn.
#[derive(Clone, Debug)]
pub struct PatternCycle {
    patterns: Vec<Pattern>,
    origin_sec: f64,
    interval_sec: f64,
    theme_interval_sec: f64,
    skipped: usize,
    last_index: usize,
}

impl PatternCycle {
    pub fn new(patterns: Vec<Pattern>, origin_sec: f64) -> CoreResult<Self> {
        if patterns.is_empty() {
            return Err(CoreError::NoPatterns);
        }
        for p in &patterns {
            p.validate()?;
        }
        Ok(Self {
            patterns,
            origin_sec,
            interval_sec: PATTERN_INTERVAL_SEC,
            theme_interval_sec: THEME_INTERVAL_SEC,
            skipped: 0,
            last_index: 0,
        })
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    fn periods(&self, now_sec: f64, interval_sec: f64) -> usize {
        ((now_sec - self.origin_sec) / interval_sec).floor().max(0.0) as usize
    }

    pub fn index_at(&self, now_sec: f64) -> usize {
        (self.periods(now_sec, self.interval_sec) + self.skipped) % self.patterns.len()
    }

    pub fn current(&self, now_sec: f64) -> &Pattern {
        &self.patterns[self.index_at(now_sec)]
    }

    pub fn current_mut(&mut self, now_sec: f64) -> &mut Pattern {
        let index = self.index_at(now_sec);
        &mut self.patterns[index]
    }

    pub fn inverted_at(&self, now_sec: f64) -> bool {
        self.periods(now_sec, self.theme_interval_sec) % 2 == 1
    }

    pub fn theme_at(&self, now_sec: f64) -> Theme {
        Theme::new(self.inverted_at(now_sec))
    }

    /// Jump to the following pattern immediately.
    pub fn skip(&mut self) {
        self.skipped = (self.skipped + 1) % self.patterns.len();
    }

    /// Note the pattern active at `now_sec`; returns its index when it changed.
    pub fn advance(&mut self, now_sec: f64) -> Option<usize> {
        let index = self.index_at(now_sec);
        if index == self.last_index {
            return None;
        }
        self.last_index = index;
        log::debug!("[pattern] switched to '{}'", self.patterns[index].name);
        Some(index)
    }
}
