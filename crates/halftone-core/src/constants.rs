// Shared wave and layout tuning constants used by both web and native frontends.

// Wave field
pub const WAVE_SPEED: f32 = 100.0; // distance units per second
pub const HORIZON_FRACTION: f32 = 0.7; // of the viewport's shorter side
pub const FIELD_GAIN: f32 = 1.8; // applied before the saturation clamp
pub const MAX_INTENSITY: f32 = 5.0;

// Focal points
pub const MAX_FOCAL_POINTS: usize = 4;
pub const SPAWN_INTERVAL_SEC: f64 = 7.0;
pub const SPAWN_PROBABILITY: f32 = 0.2;
pub const FREQUENCY_RANGE: (f32, f32) = (1.0, 3.0);
pub const INTENSITY_RANGE: (f32, f32) = (0.5, 1.0);
pub const INITIAL_BACKDATE_MAX_SEC: f64 = 5.0;
pub const SPAWN_REPLAY_LIMIT: u64 = 64; // due fires walked one by one before skipping ahead

// Dot grid
pub const DOT_SPACING: f32 = 30.0;
pub const DOT_JITTER_FRACTION: f32 = 0.05;
pub const DOT_MIN_SIZE: f32 = 5.0;
pub const DOT_SIZE_SPAN: f32 = 3.0;

// Dot styling thresholds (in kernel output units)
pub const VISIBLE_THRESHOLD: f32 = 0.15;
pub const OPACITY_PER_UNIT: f32 = 0.7;
pub const FLOOR_OPACITY: f32 = 0.05;
pub const BRIGHT_THRESHOLD: f32 = 1.2;

// Overlay
pub const RINGS_PER_POINT: usize = 3;
pub const RING_PHASE_CUTOFF: f32 = 0.9;
pub const INDICATOR_RADIUS: f32 = 3.0;
pub const OVERLAY_ALPHA: f32 = 0.15;
pub const RING_DASH: [f32; 2] = [2.0, 4.0];

// Marks
pub const PATTERN_INTERVAL_SEC: f64 = 15.0;
pub const THEME_INTERVAL_SEC: f64 = 30.0;
pub const MARK_RESERVE_PX: f32 = 80.0; // vertical space kept free around the marks
pub const DEFAULT_VIEW_BOX: [f32; 2] = [1026.91, 986.75];

// Tuning ranges for pattern parameters
pub const DURATION_RANGE_SEC: (f32, f32) = (0.1, 3.0);
pub const DELAY_RANGE_SEC: (f32, f32) = (0.001, 0.01);

// Keyboard nudges
pub const DURATION_STEP_SEC: f32 = 0.1;
pub const DELAY_STEP_SEC: f32 = 0.001;
