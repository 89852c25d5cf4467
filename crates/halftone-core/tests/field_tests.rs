// Tests for the wave-field kernel and the dot styling derived from it.

use glam::Vec2;
use halftone_core::*;
use rand::prelude::*;

fn square_field(side: f32) -> WaveField {
    WaveField::new(Viewport::new(side, side), &FieldParams::default())
}

fn point(x: f32, y: f32, start: f64, frequency: f32, intensity: f32) -> FocalPoint {
    FocalPoint {
        position: Vec2::new(x, y),
        start_time_sec: start,
        frequency,
        intensity,
    }
}

#[test]
fn empty_focal_set_yields_zero_everywhere() {
    let field = square_field(1000.0);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let p = Vec2::new(rng.gen_range(-100.0..1100.0), rng.gen_range(-100.0..1100.0));
        let t = rng.gen_range(-10.0..1000.0);
        assert_eq!(field.intensity(p, t, &[]), 0.0);
    }
}

#[test]
fn focal_point_at_query_point_at_time_zero_gives_four_and_a_half() {
    let field = square_field(1000.0);
    assert!((field.max_dimension() - 700.0).abs() < 1e-3);
    let points = [point(0.0, 0.0, 0.0, 1.0, 1.0)];
    let v = field.intensity(Vec2::ZERO, 0.0, &points);
    assert!((v - 4.5).abs() < 1e-5, "got {v}");
}

#[test]
fn query_at_horizon_is_zero_regardless_of_time() {
    let field = square_field(1000.0);
    let points = [point(0.0, 0.0, 0.0, 1.0, 1.0)];
    let at_horizon = Vec2::new(field.max_dimension(), 0.0);
    for i in 0..100 {
        let t = i as f64 * 0.037;
        assert_eq!(field.intensity(at_horizon, t, &points), 0.0, "t={t}");
    }
}

#[test]
fn contribution_vanishes_beyond_horizon() {
    let field = square_field(800.0);
    let fp = point(400.0, 400.0, 0.0, 2.0, 1.0);
    let horizon = field.max_dimension();
    for step in 0..50 {
        let d = horizon + step as f32 * 13.0;
        let p = fp.position + Vec2::new(0.0, d);
        for t in [0.0, 0.3, 1.7, 42.0] {
            assert_eq!(field.contribution(p, t, &fp), 0.0, "d={d} t={t}");
        }
    }
}

#[test]
fn attenuation_falls_linearly_toward_horizon() {
    let field = square_field(1000.0);
    let horizon = field.max_dimension();
    assert!((field.attenuation(0.0) - 1.0).abs() < 1e-6);
    assert!((field.attenuation(horizon * 0.5) - 0.5).abs() < 1e-5);
    assert_eq!(field.attenuation(horizon * 2.0), 0.0);
    let mut prev = field.attenuation(0.0);
    for i in 1..=70 {
        let a = field.attenuation(i as f32 * 10.0);
        assert!(a <= prev, "attenuation increased at {}", i * 10);
        prev = a;
    }
}

#[test]
fn intensity_stays_within_bounds_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let vp = Viewport::new(rng.gen_range(1.0..2000.0), rng.gen_range(1.0..2000.0));
        let field = WaveField::new(vp, &FieldParams::default());
        let now = rng.gen_range(0.0..500.0);
        let mut set = FocalSet::new();
        for _ in 0..rng.gen_range(0..=MAX_FOCAL_POINTS) {
            set.push(FocalPoint::random(vp, now - rng.gen_range(-2.0..20.0), &mut rng));
        }
        for _ in 0..100 {
            let p = Vec2::new(rng.gen_range(0.0..vp.width), rng.gen_range(0.0..vp.height));
            let v = field.intensity(p, now, set.as_slice());
            assert!((0.0..=MAX_INTENSITY).contains(&v), "out of range: {v}");
        }
    }
}

#[test]
fn single_point_is_periodic_in_time() {
    let field = square_field(1000.0);
    let p = Vec2::new(320.0, 280.0);
    for frequency in [1.0_f32, 1.5, 2.0, 2.75] {
        let points = [point(200.0, 200.0, 3.0, frequency, 0.8)];
        let period = 1.0 / frequency as f64;
        for i in 0..40 {
            let t = 3.0 + i as f64 * 0.113;
            let a = field.intensity(p, t, &points);
            let b = field.intensity(p, t + period, &points);
            let c = field.intensity(p, t + 3.0 * period, &points);
            assert!((a - b).abs() < 1e-3, "f={frequency} t={t}: {a} vs {b}");
            assert!((a - c).abs() < 1e-3, "f={frequency} t={t}: {a} vs {c}");
        }
    }
}

#[test]
fn wave_arrives_later_at_farther_points() {
    // A crest at the source at t reaches distance d at t + d / speed.
    let field = square_field(1000.0);
    let points = [point(0.0, 0.0, 0.0, 1.0, 1.0)];
    let crest_at_source = field.contribution(Vec2::ZERO, 0.25, &points[0]);
    let near = Vec2::new(50.0, 0.0);
    let arrived = field.contribution(near, 0.25 + 50.0 / WAVE_SPEED as f64, &points[0]);
    let attenuation = field.attenuation(50.0);
    assert!((crest_at_source - 1.0).abs() < 1e-5);
    assert!((arrived - attenuation).abs() < 1e-4);
}

#[test]
fn overlapping_points_saturate_at_max() {
    let field = square_field(1000.0);
    let points: Vec<FocalPoint> = (0..4).map(|_| point(500.0, 500.0, 0.0, 1.0, 1.0)).collect();
    let v = field.intensity(Vec2::new(500.0, 500.0), 0.25, &points);
    assert_eq!(v, MAX_INTENSITY);
}

#[test]
fn backdated_and_future_start_times_are_defined() {
    let field = square_field(600.0);
    let points = [point(100.0, 100.0, 10.0, 1.3, 0.7)];
    let v = field.intensity(Vec2::new(120.0, 90.0), 8.0, &points);
    assert!(v.is_finite());
    assert!((0.0..=MAX_INTENSITY).contains(&v));
}

#[test]
fn resize_recomputes_horizon() {
    let mut field = square_field(1000.0);
    field.resize(Viewport::new(400.0, 1200.0));
    assert!((field.max_dimension() - 280.0).abs() < 1e-3);
    field.resize(Viewport::new(0.0, 0.0));
    assert_eq!(field.max_dimension(), 0.0);
    let points = [point(0.0, 0.0, 0.0, 1.0, 1.0)];
    assert_eq!(field.intensity(Vec2::new(5.0, 0.0), 0.25, &points), 0.0);
}

#[test]
fn dot_style_thresholds() {
    let idle = DotStyle::from_intensity(6.0, 0.0);
    assert_eq!(idle.radius, 6.0);
    assert_eq!(idle.opacity, FLOOR_OPACITY);
    assert_eq!(idle.tone, Tone::Dim);

    let at_threshold = DotStyle::from_intensity(6.0, 0.15);
    assert_eq!(at_threshold.opacity, FLOOR_OPACITY);

    let mid = DotStyle::from_intensity(6.0, 1.0);
    assert!((mid.opacity - 0.7).abs() < 1e-6);
    assert_eq!(mid.tone, Tone::Dim);
    assert_eq!(mid.radius, 7.0);

    let bright = DotStyle::from_intensity(5.0, 2.0);
    assert_eq!(bright.opacity, 1.0);
    assert_eq!(bright.tone, Tone::Bright);
    assert_eq!(bright.color().to_rgb8(), [255, 255, 255]);
    assert_eq!(mid.color().to_rgb8(), [128, 128, 128]);
}
