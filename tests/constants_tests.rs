// Host-side tests for the web constants and the core tuning constants they sit beside.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use halftone_core::{
    BRIGHT_THRESHOLD, DELAY_RANGE_SEC, DELAY_STEP_SEC, DURATION_RANGE_SEC, DURATION_STEP_SEC,
    FLOOR_OPACITY, HORIZON_FRACTION, MAX_INTENSITY, OPACITY_PER_UNIT, RING_PHASE_CUTOFF,
    VISIBLE_THRESHOLD,
};

#[test]
fn element_ids_are_distinct_and_plain() {
    let ids = [CANVAS_ID, FULLSCREEN_BUTTON_ID, HINT_OVERLAY_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.starts_with('#'), "ids are passed without a selector prefix");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn device_pixel_ratio_floor_is_positive() {
    assert!(MIN_DEVICE_PIXEL_RATIO > 0.0);
}

#[test]
fn key_help_names_every_binding() {
    for key in ["m ", "o ", "space", "n ", "[ ]", ", .", "enter", "h "] {
        assert!(KEY_HELP.contains(key), "missing {key:?}");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn styling_thresholds_are_ordered() {
    assert!(FLOOR_OPACITY < VISIBLE_THRESHOLD * OPACITY_PER_UNIT + 1.0);
    assert!(VISIBLE_THRESHOLD < BRIGHT_THRESHOLD);
    assert!(BRIGHT_THRESHOLD < MAX_INTENSITY);
    assert!(HORIZON_FRACTION > 0.0 && HORIZON_FRACTION <= 1.0);
    assert!(RING_PHASE_CUTOFF > 0.0 && RING_PHASE_CUTOFF < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn nudge_steps_fit_their_ranges() {
    assert!(DURATION_STEP_SEC < DURATION_RANGE_SEC.1 - DURATION_RANGE_SEC.0);
    assert!(DELAY_STEP_SEC < DELAY_RANGE_SEC.1 - DELAY_RANGE_SEC.0);
    assert!(DELAY_RANGE_SEC.0 > 0.0);
}
