use halftone_core::Command;

/// Commands whose key also has a browser default (page scroll, form submit)
/// that must be suppressed.
#[inline]
pub fn suppresses_default(command: Command) -> bool {
    matches!(command, Command::TogglePause | Command::ToggleFullscreen)
}

/// Commands whose effect shows up in the hint overlay.
#[inline]
pub fn touches_hint(command: Command) -> bool {
    !matches!(command, Command::ToggleFullscreen | Command::ExitFullscreen)
}
