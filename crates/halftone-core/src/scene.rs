//! Explicit per-view state with a step function and a read-only draw.
//!
//! Front ends own one scene per view, call `advance(now)` once per frame to run
//! the timers, then `draw(now, surface)` which only reads the state.

use glam::Vec2;
use rand::prelude::*;

use crate::constants::MARK_RESERVE_PX;
use crate::error::CoreResult;
use crate::field::{DotStyle, FieldParams, Viewport, WaveField};
use crate::focal::{FocalPoint, FocalSet, SpawnTimer};
use crate::grid::{dot_grid, Dot};
use crate::marks::{mark_grid, FitTransform, RectMark, ViewBox};
use crate::pattern::{Pattern, PatternCycle};
use crate::rings::draw_overlay;
use crate::surface::{Rgba, Surface};

pub const DEFAULT_MARK_COLS: usize = 16;
pub const DEFAULT_MARK_ROWS: usize = 16;
pub const DEFAULT_MARK_GAP: f32 = 10.0;
pub const DEFAULT_MARK_CORNER: f32 = 8.0;

/// Halftone dots modulated by the wave field.
pub struct FieldScene {
    viewport: Viewport,
    params: FieldParams,
    field: WaveField,
    dots: Vec<Dot>,
    focal: FocalSet,
    spawn: SpawnTimer,
    rng: StdRng,
}

impl FieldScene {
    pub fn new(viewport: Viewport, now_sec: f64, params: FieldParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = WaveField::new(viewport, &params);
        let dots = dot_grid(viewport, params.dot_spacing, &mut rng);
        let focal = FocalSet::seeded(viewport, now_sec, &mut rng);
        let spawn = SpawnTimer::new(now_sec, params.spawn_interval_sec, params.spawn_probability);
        log::info!(
            "[field] {}x{} dots={} focal={} horizon={:.1}",
            viewport.width,
            viewport.height,
            dots.len(),
            focal.len(),
            field.max_dimension()
        );
        Self {
            viewport,
            params,
            field,
            dots,
            focal,
            spawn,
            rng,
        }
    }

    /// Rebuild everything that depends on the viewport.
    pub fn resize(&mut self, viewport: Viewport, now_sec: f64) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.field.resize(viewport);
        self.dots = dot_grid(viewport, self.params.dot_spacing, &mut self.rng);
        self.focal = FocalSet::seeded(viewport, now_sec, &mut self.rng);
        self.spawn = SpawnTimer::new(
            now_sec,
            self.params.spawn_interval_sec,
            self.params.spawn_probability,
        );
        log::debug!(
            "[field] resized to {}x{} dots={}",
            viewport.width,
            viewport.height,
            self.dots.len()
        );
    }

    /// Run the focal-point timer up to `now_sec`. Returns the number of points added.
    pub fn advance(&mut self, now_sec: f64) -> usize {
        self.spawn
            .advance(now_sec, self.viewport, &mut self.focal, &mut self.rng)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn focal_points(&self) -> &[FocalPoint] {
        self.focal.as_slice()
    }

    pub fn focal_mut(&mut self) -> &mut FocalSet {
        &mut self.focal
    }

    pub fn intensity_at(&self, p: Vec2, now_sec: f64) -> f32 {
        self.field.intensity(p, now_sec, self.focal.as_slice())
    }

    pub fn dot_styles(&self, now_sec: f64) -> impl Iterator<Item = (&Dot, DotStyle)> + '_ {
        self.dots.iter().map(move |dot| {
            let intensity = self.intensity_at(dot.position, now_sec);
            (dot, DotStyle::from_intensity(dot.size, intensity))
        })
    }

    pub fn draw<S: Surface + ?Sized>(&self, now_sec: f64, show_rings: bool, surface: &mut S) {
        surface.begin(self.viewport, Rgba::BLACK);
        for (dot, style) in self.dot_styles(now_sec) {
            surface.fill_circle(dot.position, style.radius, style.color());
        }
        if show_rings {
            draw_overlay(
                surface,
                self.focal.as_slice(),
                now_sec,
                self.field.max_dimension(),
            );
        }
        surface.finish();
    }
}

/// Rounded-rectangle marks animated by a rotating set of patterns.
pub struct MarkScene {
    viewport: Viewport,
    view_box: ViewBox,
    marks: Vec<RectMark>,
    fit: FitTransform,
    cycle: PatternCycle,
}

impl MarkScene {
    pub fn new(viewport: Viewport, now_sec: f64, patterns: Vec<Pattern>) -> CoreResult<Self> {
        let view_box = ViewBox::default();
        let marks = mark_grid(
            view_box,
            DEFAULT_MARK_COLS,
            DEFAULT_MARK_ROWS,
            DEFAULT_MARK_GAP,
            DEFAULT_MARK_CORNER,
        );
        let cycle = PatternCycle::new(patterns, now_sec)?;
        Ok(Self::with_marks(viewport, view_box, marks, cycle))
    }

    pub fn with_marks(
        viewport: Viewport,
        view_box: ViewBox,
        marks: Vec<RectMark>,
        cycle: PatternCycle,
    ) -> Self {
        Self {
            viewport,
            view_box,
            marks,
            fit: FitTransform::fit(view_box, viewport, MARK_RESERVE_PX),
            cycle,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.fit = FitTransform::fit(self.view_box, viewport, MARK_RESERVE_PX);
    }

    pub fn advance(&mut self, now_sec: f64) -> Option<usize> {
        self.cycle.advance(now_sec)
    }

    pub fn marks(&self) -> &[RectMark] {
        &self.marks
    }

    pub fn fit(&self) -> FitTransform {
        self.fit
    }

    pub fn cycle(&self) -> &PatternCycle {
        &self.cycle
    }

    pub fn cycle_mut(&mut self) -> &mut PatternCycle {
        &mut self.cycle
    }

    pub fn draw<S: Surface + ?Sized>(&self, now_sec: f64, surface: &mut S) {
        let theme = self.cycle.theme_at(now_sec);
        let pattern = self.cycle.current(now_sec);
        surface.begin(self.viewport, theme.background);
        for (i, mark) in self.marks.iter().enumerate() {
            let style = pattern.style_at(i, now_sec);
            let rect = self
                .fit
                .apply(&mark.translated(style.offset))
                .scaled(style.scale)
                .rotated(style.rotation_deg);
            surface.fill_rounded_rect(&rect, theme.ink.with_alpha(style.opacity));
        }
        surface.finish();
    }
}
