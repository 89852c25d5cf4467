// DOM hooks and overlay styling for the web front end.

pub const CANVAS_ID: &str = "app-canvas";
pub const FULLSCREEN_BUTTON_ID: &str = "fullscreen-toggle";
pub const HINT_OVERLAY_ID: &str = "hint-overlay";

// Class toggled on the hint overlay; the inline style is a fallback for pages without it.
pub const HIDDEN_CLASS: &str = "hidden";

pub const HINT_STYLE: &str = "color: #e6e6e6; font: 13px system-ui; \
    background: rgba(0, 0, 0, 0.72); padding: 8px 12px; border-radius: 6px; \
    border: 1px solid rgba(255, 255, 255, 0.15);";

pub const KEY_HELP: &str =
    "m mode · o rings · space pause · n next pattern · [ ] duration · , . delay · enter fullscreen · h hide";

// Browsers report devicePixelRatio 0 in some headless setups.
pub const MIN_DEVICE_PIXEL_RATIO: f64 = 1.0;
