//! Front-end state shared by the web and native shells.
//!
//! Both shells own one [`App`], feed it frame deltas and key names, and hand
//! it a [`Surface`] to draw on. Nothing here touches a platform API.

use crate::constants::{DELAY_STEP_SEC, DURATION_STEP_SEC};
use crate::error::CoreResult;
use crate::field::{FieldParams, Viewport};
use crate::pattern::Pattern;
use crate::scene::{FieldScene, MarkScene};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Field,
    Marks,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Field => ViewMode::Marks,
            ViewMode::Marks => ViewMode::Field,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Field => "field",
            ViewMode::Marks => "marks",
        }
    }
}

/// Scene time in seconds. It stands still while paused.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneClock {
    now_sec: f64,
    paused: bool,
}

impl SceneClock {
    pub fn new(start_sec: f64) -> Self {
        Self {
            now_sec: start_sec,
            paused: false,
        }
    }

    pub fn now_sec(&self) -> f64 {
        self.now_sec
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Advance by a wall-clock delta. Negative or non-finite deltas are ignored.
    pub fn tick(&mut self, dt_sec: f64) -> f64 {
        let next = self.now_sec + dt_sec;
        if !self.paused && dt_sec > 0.0 && next.is_finite() {
            self.now_sec = next;
        }
        self.now_sec
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    ToggleMode,
    ToggleRings,
    TogglePause,
    NextPattern,
    NudgeDuration(f32),
    NudgeDelay(f32),
    ToggleFullscreen,
    ExitFullscreen,
    ToggleHint,
}

/// Key bindings, by `KeyboardEvent.key` name.
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "m" | "M" => Some(Command::ToggleMode),
        "o" | "O" => Some(Command::ToggleRings),
        " " => Some(Command::TogglePause),
        "n" | "N" => Some(Command::NextPattern),
        "[" => Some(Command::NudgeDuration(-DURATION_STEP_SEC)),
        "]" => Some(Command::NudgeDuration(DURATION_STEP_SEC)),
        "," => Some(Command::NudgeDelay(-DELAY_STEP_SEC)),
        "." => Some(Command::NudgeDelay(DELAY_STEP_SEC)),
        "Enter" => Some(Command::ToggleFullscreen),
        "Escape" => Some(Command::ExitFullscreen),
        "h" | "H" => Some(Command::ToggleHint),
        _ => None,
    }
}

pub struct App {
    mode: ViewMode,
    show_rings: bool,
    hint_visible: bool,
    clock: SceneClock,
    field: FieldScene,
    marks: MarkScene,
}

impl App {
    pub fn new(
        viewport: Viewport,
        params: FieldParams,
        patterns: Vec<Pattern>,
        seed: u64,
    ) -> CoreResult<Self> {
        params.validate()?;
        let clock = SceneClock::default();
        let field = FieldScene::new(viewport, clock.now_sec(), params, seed);
        let marks = MarkScene::new(viewport, clock.now_sec(), patterns)?;
        Ok(Self {
            mode: ViewMode::Field,
            show_rings: true,
            hint_visible: false,
            clock,
            field,
            marks,
        })
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn show_rings(&self) -> bool {
        self.show_rings
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn clock(&self) -> &SceneClock {
        &self.clock
    }

    pub fn field(&self) -> &FieldScene {
        &self.field
    }

    pub fn marks(&self) -> &MarkScene {
        &self.marks
    }

    pub fn resize(&mut self, viewport: Viewport) {
        let now = self.clock.now_sec();
        self.field.resize(viewport, now);
        self.marks.resize(viewport);
    }

    /// Move scene time forward by `dt_sec` and run both scenes' timers.
    pub fn tick(&mut self, dt_sec: f64) -> f64 {
        let now = self.clock.tick(dt_sec);
        if !self.clock.is_paused() {
            self.field.advance(now);
            self.marks.advance(now);
        }
        now
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let now = self.clock.now_sec();
        match self.mode {
            ViewMode::Field => self.field.draw(now, self.show_rings, surface),
            ViewMode::Marks => self.marks.draw(now, surface),
        }
    }

    /// Apply a command. Returns false for commands the shell must handle
    /// itself (fullscreen).
    pub fn handle(&mut self, command: Command) -> bool {
        let now = self.clock.now_sec();
        match command {
            Command::ToggleMode => {
                self.mode = self.mode.toggled();
                log::info!("[keys] mode={}", self.mode.name());
            }
            Command::ToggleRings => self.show_rings = !self.show_rings,
            Command::TogglePause => {
                let paused = self.clock.toggle_pause();
                log::info!("[keys] paused={paused}");
            }
            Command::NextPattern => {
                self.marks.cycle_mut().skip();
                self.marks.advance(now);
            }
            Command::NudgeDuration(delta) => {
                self.marks.cycle_mut().current_mut(now).nudge_duration(delta)
            }
            Command::NudgeDelay(delta) => {
                self.marks.cycle_mut().current_mut(now).nudge_delay(delta)
            }
            Command::ToggleHint => self.hint_visible = !self.hint_visible,
            Command::ToggleFullscreen | Command::ExitFullscreen => return false,
        }
        true
    }

    /// One-line summary of the current view for the hint overlay.
    pub fn status_line(&self) -> String {
        let now = self.clock.now_sec();
        let state = if self.clock.is_paused() { "paused" } else { "running" };
        match self.mode {
            ViewMode::Field => format!(
                "field · {} focal points · rings {} · {state}",
                self.field.focal_points().len(),
                if self.show_rings { "on" } else { "off" },
            ),
            ViewMode::Marks => {
                let pattern = self.marks.cycle().current(now);
                format!(
                    "marks · {} · duration {:.1}s · delay {:.3}s · {state}",
                    pattern.name, pattern.duration_sec, pattern.delay_sec
                )
            }
        }
    }
}
