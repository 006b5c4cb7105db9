//! Virtual clock with speed-scaled accrual.
//!
//! [`VirtualClock`] decouples simulated elapsed time from real elapsed
//! time via a mutable speed factor. Accrual is the integral of the
//! speed over each real-time sub-interval: accrued virtual time is
//! committed whenever the speed changes, the clock pauses, or a tick
//! is evaluated, and the current speed applies only to the segment
//! since the last commit. Changing speed mid-run therefore never
//! rescales history.
//!
//! The clock never reads wall time itself. Callers pass monotonic
//! timestamps (`Duration` since an arbitrary epoch), so tests can
//! drive it with a synthetic clock.

use std::time::Duration;

/// Speed-scaled virtual clock.
///
/// While running, `accrued + (now − anchor) × speed` of virtual time
/// has elapsed; while paused, exactly `accrued`.
#[derive(Clone, Debug)]
pub struct VirtualClock {
    /// Virtual time committed up to the last commit point.
    accrued: Duration,
    /// Real timestamp of the last commit point, while running.
    anchor: Option<Duration>,
    /// Rate of virtual-time accrual relative to real time. Positive.
    speed: f64,
}

impl VirtualClock {
    /// Create a paused clock at zero with the given speed factor.
    ///
    /// The speed factor must already be validated (finite, positive).
    pub fn new(speed: f64) -> Self {
        debug_assert!(speed.is_finite() && speed > 0.0);
        Self {
            accrued: Duration::ZERO,
            anchor: None,
            speed,
        }
    }

    /// The current speed factor.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Virtual time committed so far. Excludes any uncommitted segment.
    pub fn accrued(&self) -> Duration {
        self.accrued
    }

    /// Whether the clock is accruing virtual time.
    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start accruing from `now`. No-op if already running, so callers
    /// may re-issue play without double-anchoring.
    pub fn resume_at(&mut self, now: Duration) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    /// Commit the segment since the last commit point and stop
    /// accruing. No virtual time passes while paused.
    pub fn pause_at(&mut self, now: Duration) {
        self.commit_at(now);
        self.anchor = None;
    }

    /// Commit accrual up to `now` and return total virtual elapsed time.
    ///
    /// While paused this is a pure read of the committed value.
    pub fn advance_to(&mut self, now: Duration) -> Duration {
        self.commit_at(now);
        self.accrued
    }

    /// Change the speed factor, committing the current segment at the
    /// old speed first. The new speed affects future accrual only.
    ///
    /// The value must already be validated (finite, positive).
    pub fn set_speed_at(&mut self, now: Duration, speed: f64) {
        debug_assert!(speed.is_finite() && speed > 0.0);
        self.commit_at(now);
        self.speed = speed;
    }

    /// Zero the clock and stop it, adopting a new speed factor.
    pub fn reset(&mut self, speed: f64) {
        debug_assert!(speed.is_finite() && speed > 0.0);
        self.accrued = Duration::ZERO;
        self.anchor = None;
        self.speed = speed;
    }

    /// Fold the segment since the anchor into `accrued` at the current
    /// speed and move the anchor to `now`. `saturating_sub` guards
    /// against a caller handing in a timestamp older than the anchor.
    fn commit_at(&mut self, now: Duration) {
        if let Some(anchor) = self.anchor {
            let real = now.saturating_sub(anchor);
            self.accrued += real.mul_f64(self.speed);
            // A stale `now` must not move the anchor backwards, or the
            // skipped interval would be counted twice later.
            self.anchor = Some(now.max(anchor));
        }
    }
}
