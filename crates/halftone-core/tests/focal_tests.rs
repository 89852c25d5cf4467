// Tests for the focal-point set, its seeding, and the spawn timer.

use glam::Vec2;
use halftone_core::*;
use rand::prelude::*;

fn stamped(start: f64) -> FocalPoint {
    FocalPoint {
        position: Vec2::new(10.0, 20.0),
        start_time_sec: start,
        frequency: 1.0,
        intensity: 1.0,
    }
}

fn starts(set: &FocalSet) -> Vec<f64> {
    set.iter().map(|p| p.start_time_sec).collect()
}

#[test]
fn set_never_exceeds_cap_and_keeps_most_recent() {
    let mut set = FocalSet::new();
    for i in 0..10 {
        set.push(stamped(i as f64));
        assert!(set.len() <= MAX_FOCAL_POINTS);
    }
    assert_eq!(set.len(), 4);
    assert_eq!(starts(&set), vec![6.0, 7.0, 8.0, 9.0]);
}

#[test]
fn push_evicts_oldest_only_when_full() {
    let mut set = FocalSet::new();
    for i in 0..4 {
        assert_eq!(set.push(stamped(i as f64)), None);
    }
    let evicted = set.push(stamped(4.0)).expect("full set evicts");
    assert_eq!(evicted.start_time_sec, 0.0);
    assert_eq!(starts(&set), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn seeded_set_is_backdated_and_in_range() {
    let vp = Viewport::new(1280.0, 720.0);
    let now = 100.0;
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let set = FocalSet::seeded(vp, now, &mut rng);
        assert!((2..=3).contains(&set.len()), "seed {seed}: len {}", set.len());
        for p in set.iter() {
            assert!(p.start_time_sec <= now);
            assert!(p.start_time_sec >= now - INITIAL_BACKDATE_MAX_SEC);
            assert!((FREQUENCY_RANGE.0..=FREQUENCY_RANGE.1).contains(&p.frequency));
            assert!((INTENSITY_RANGE.0..=INTENSITY_RANGE.1).contains(&p.intensity));
            assert!(p.position.x >= 0.0 && p.position.x <= vp.width);
            assert!(p.position.y >= 0.0 && p.position.y <= vp.height);
        }
    }
}

#[test]
fn seeding_draws_both_two_and_three_points() {
    let vp = Viewport::new(800.0, 600.0);
    let sizes: Vec<usize> = (0..64)
        .map(|seed| FocalSet::seeded(vp, 0.0, &mut StdRng::seed_from_u64(seed)).len())
        .collect();
    assert!(sizes.contains(&2));
    assert!(sizes.contains(&3));
}

#[test]
fn timer_always_spawning_retains_last_four_fire_times() {
    let vp = Viewport::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(1);
    let mut set = FocalSet::new();
    let mut timer = SpawnTimer::new(0.0, SPAWN_INTERVAL_SEC, 1.0);
    let mut added = 0;
    for frame in 0..=(70 * 60) {
        added += timer.advance(frame as f64 / 60.0, vp, &mut set, &mut rng);
        assert!(set.len() <= MAX_FOCAL_POINTS);
    }
    assert_eq!(added, 10);
    assert_eq!(starts(&set), vec![49.0, 56.0, 63.0, 70.0]);
}

#[test]
fn timer_never_spawning_leaves_set_untouched() {
    let vp = Viewport::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(2);
    let mut set = FocalSet::new();
    set.push(stamped(-1.0));
    let mut timer = SpawnTimer::new(0.0, SPAWN_INTERVAL_SEC, 0.0);
    assert_eq!(timer.advance(100.0, vp, &mut set, &mut rng), 0);
    assert_eq!(starts(&set), vec![-1.0]);
    assert_eq!(timer.next_fire_sec(), 105.0);
}

#[test]
fn timer_waits_for_first_interval() {
    let vp = Viewport::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(3);
    let mut set = FocalSet::new();
    let mut timer = SpawnTimer::new(10.0, 7.0, 1.0);
    assert_eq!(timer.advance(16.9, vp, &mut set, &mut rng), 0);
    assert!(set.is_empty());
    assert_eq!(timer.advance(17.0, vp, &mut set, &mut rng), 1);
    assert_eq!(starts(&set), vec![17.0]);
}

#[test]
fn late_frame_replays_missed_fires_with_their_own_times() {
    let vp = Viewport::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(4);
    let mut set = FocalSet::new();
    let mut timer = SpawnTimer::new(0.0, 7.0, 1.0);
    assert_eq!(timer.advance(22.0, vp, &mut set, &mut rng), 3);
    assert_eq!(starts(&set), vec![7.0, 14.0, 21.0]);
}

#[test]
fn spawn_rate_roughly_matches_probability() {
    let vp = Viewport::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(5);
    let mut set = FocalSet::new();
    let mut timer = SpawnTimer::new(0.0, 1.0, SPAWN_PROBABILITY);
    let added: usize = (1..=10_000)
        .map(|t| timer.advance(t as f64, vp, &mut set, &mut rng))
        .sum();
    let rate = added as f32 / 10_000.0;
    assert!((rate - SPAWN_PROBABILITY).abs() < 0.03, "rate {rate}");
}

#[test]
fn long_gap_keeps_only_the_newest_fires() {
    let vp = Viewport::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(6);
    let mut set = FocalSet::new();
    set.push(stamped(-1.0));
    let mut timer = SpawnTimer::new(0.0, 7.0, 1.0);
    assert_eq!(timer.advance(7.0e8, vp, &mut set, &mut rng), MAX_FOCAL_POINTS);
    assert_eq!(
        starts(&set),
        vec![7.0e8 - 21.0, 7.0e8 - 14.0, 7.0e8 - 7.0, 7.0e8]
    );
    assert_eq!(timer.next_fire_sec(), 7.0e8 + 7.0);
}

#[test]
fn long_gap_with_rare_spawns_lands_on_fire_slots() {
    let vp = Viewport::new(1000.0, 1000.0);
    let now = 7.0e8;
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut set = FocalSet::new();
        let mut timer = SpawnTimer::new(0.0, 7.0, SPAWN_PROBABILITY);
        let added = timer.advance(now, vp, &mut set, &mut rng);
        assert!(added <= MAX_FOCAL_POINTS);
        assert_eq!(set.len(), added);
        let times = starts(&set);
        assert!(times.windows(2).all(|w| w[0] < w[1]), "{times:?}");
        for t in times {
            assert!(t <= now && t > now - 7.0 * 500.0, "start {t}");
            assert_eq!(t % 7.0, 0.0);
        }
        assert!(timer.next_fire_sec() > now);
    }
}

#[test]
fn tiny_interval_over_a_long_gap_is_bounded() {
    let vp = Viewport::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(7);
    let mut set = FocalSet::new();
    let mut timer = SpawnTimer::new(0.0, 1.0e-6, 0.5);
    let added = timer.advance(1.0e6, vp, &mut set, &mut rng);
    assert_eq!(added, MAX_FOCAL_POINTS);
    assert!(set.iter().all(|p| p.start_time_sec <= 1.0e6));
}

#[test]
fn non_finite_time_is_ignored() {
    let vp = Viewport::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(8);
    let mut set = FocalSet::new();
    let mut timer = SpawnTimer::new(0.0, 7.0, 1.0);
    assert_eq!(timer.advance(f64::INFINITY, vp, &mut set, &mut rng), 0);
    assert_eq!(timer.advance(f64::NAN, vp, &mut set, &mut rng), 0);
    assert!(set.is_empty());
    assert_eq!(timer.next_fire_sec(), 7.0);
}
