use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::constants::*;
use crate::field::Viewport;

/// An emitter of an outward-travelling sine wave.
///
/// The phase is derived from `start_time_sec` alone, so a point carries no
/// per-frame state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocalPoint {
    pub position: Vec2,
    pub start_time_sec: f64,
    pub frequency: f32,
    pub intensity: f32,
}

impl FocalPoint {
    pub fn random<R: Rng + ?Sized>(viewport: Viewport, start_time_sec: f64, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.gen::<f32>() * viewport.width.max(0.0),
            rng.gen::<f32>() * viewport.height.max(0.0),
        );
        let frequency =
            FREQUENCY_RANGE.0 + rng.gen::<f32>() * (FREQUENCY_RANGE.1 - FREQUENCY_RANGE.0);
        let intensity =
            INTENSITY_RANGE.0 + rng.gen::<f32>() * (INTENSITY_RANGE.1 - INTENSITY_RANGE.0);
        Self {
            position,
            start_time_sec,
            frequency,
            intensity,
        }
    }

    pub fn elapsed(&self, now_sec: f64) -> f64 {
        now_sec - self.start_time_sec
    }
}

/// Insertion-ordered set of at most [`MAX_FOCAL_POINTS`] points with FIFO eviction.
#[derive(Clone, Debug, Default)]
pub struct FocalSet {
    points: SmallVec<[FocalPoint; MAX_FOCAL_POINTS]>,
}

impl FocalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two or three points with start times backdated by up to
    /// [`INITIAL_BACKDATE_MAX_SEC`], so waves are already travelling on load.
    pub fn seeded<R: Rng + ?Sized>(viewport: Viewport, now_sec: f64, rng: &mut R) -> Self {
        let mut set = Self::new();
        let count = rng.gen_range(2..=3);
        for _ in 0..count {
            let start = now_sec - rng.gen::<f64>() * INITIAL_BACKDATE_MAX_SEC;
            set.push(FocalPoint::random(viewport, start, rng));
        }
        set
    }

    /// Append `point`, evicting the oldest point first when the set is full.
    /// Returns the evicted point, if any.
    pub fn push(&mut self, point: FocalPoint) -> Option<FocalPoint> {
        let evicted = if self.points.len() >= MAX_FOCAL_POINTS {
            Some(self.points.remove(0))
        } else {
            None
        };
        self.points.push(point);
        evicted
    }

    pub fn as_slice(&self) -> &[FocalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &FocalPoint> {
        self.points.iter()
    }
}

/// Fixed-interval timer that occasionally adds a focal point.
///
/// Fires are counted from `origin_sec`, so a late frame replays every missed
/// fire in order, each with its own fire time as the new point's start.
/// Past [`SPAWN_REPLAY_LIMIT`] due fires only the last few successes are
/// drawn, since anything older would be evicted anyway.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval_sec: f64,
    probability: f32,
    next_fire_sec: f64,
}

impl SpawnTimer {
    pub fn new(origin_sec: f64, interval_sec: f64, probability: f32) -> Self {
        Self {
            interval_sec,
            probability,
            next_fire_sec: origin_sec + interval_sec,
        }
    }

    pub fn next_fire_sec(&self) -> f64 {
        self.next_fire_sec
    }

    /// Run every fire due at or before `now_sec`. Returns how many points were added.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        now_sec: f64,
        viewport: Viewport,
        set: &mut FocalSet,
        rng: &mut R,
    ) -> usize {
        if !now_sec.is_finite() || !(now_sec >= self.next_fire_sec) {
            return 0;
        }
        let first_sec = self.next_fire_sec;
        let due = ((now_sec - first_sec) / self.interval_sec).floor() + 1.0;
        self.next_fire_sec = first_sec + due * self.interval_sec;

        if due > SPAWN_REPLAY_LIMIT as f64 {
            return self.skip_ahead(first_sec, due, now_sec, viewport, set, rng);
        }
        let mut added = 0;
        for slot in 0..due as u64 {
            if rng.gen::<f32>() < self.probability {
                let fire_sec = first_sec + slot as f64 * self.interval_sec;
                spawn(fire_sec, viewport, set, rng);
                added += 1;
            }
        }
        added
    }

    // Walks backwards from the newest slot collecting up to MAX_FOCAL_POINTS
    // successes, then spawns them oldest first.
    fn skip_ahead<R: Rng + ?Sized>(
        &self,
        first_sec: f64,
        due: f64,
        now_sec: f64,
        viewport: Viewport,
        set: &mut FocalSet,
        rng: &mut R,
    ) -> usize {
        let mut hits: SmallVec<[f64; MAX_FOCAL_POINTS]> = SmallVec::new();
        let mut slot = due - 1.0;
        while hits.len() < MAX_FOCAL_POINTS {
            slot -= self.failures_before_success(rng);
            if slot < 0.0 {
                break;
            }
            hits.push(slot);
            slot -= 1.0;
        }
        log::debug!("[focal] skipped {due} spawn slots, {} survive", hits.len());
        for &slot in hits.iter().rev() {
            let fire_sec = (first_sec + slot * self.interval_sec).min(now_sec);
            spawn(fire_sec, viewport, set, rng);
        }
        hits.len()
    }

    /// Geometric draw: failed slots before the next successful one.
    fn failures_before_success<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let p = self.probability as f64;
        if p >= 1.0 {
            return 0.0;
        }
        if p <= 0.0 {
            return f64::INFINITY;
        }
        let u = 1.0 - rng.gen::<f64>();
        (u.ln() / (1.0 - p).ln()).floor()
    }
}

fn spawn<R: Rng + ?Sized>(fire_sec: f64, viewport: Viewport, set: &mut FocalSet, rng: &mut R) {
    let point = FocalPoint::random(viewport, fire_sec, rng);
    if let Some(old) = set.push(point) {
        log::debug!(
            "[focal] evicted ({:.0},{:.0}) started {:.2}s",
            old.position.x,
            old.position.y,
            old.start_time_sec
        );
    }
    log::debug!(
        "[focal] spawned ({:.0},{:.0}) f={:.2} i={:.2} live={}",
        point.position.x,
        point.position.y,
        point.frequency,
        point.intensity,
        set.len()
    );
}
