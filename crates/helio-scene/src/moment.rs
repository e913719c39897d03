//! The scene's "current moment": a Unix-millisecond timestamp source that
//! can run at wall-clock speed, run faster (time-lapse), be scrubbed, or
//! be frozen entirely.

use std::time::Instant;

use chrono::Utc;

/// Produces the scene's current moment in Unix milliseconds.
#[derive(Clone, Debug)]
pub enum MomentSource {
    /// A frozen timestamp; every call returns the same value.
    Fixed(i64),
    /// Wall-clock anchored: `anchor_ms` plus real elapsed time scaled by
    /// `speed` (1.0 = real time).
    Running {
        anchor_ms: i64,
        started: Instant,
        speed: f64,
    },
}

impl MomentSource {
    /// A frozen moment.
    pub fn fixed(unix_ms: i64) -> Self {
        Self::Fixed(unix_ms)
    }

    /// A running moment anchored at the current wall clock.
    pub fn running(speed: f64) -> Self {
        Self::running_from(Utc::now().timestamp_millis(), speed)
    }

    /// A running moment anchored at an explicit timestamp.
    pub fn running_from(anchor_ms: i64, speed: f64) -> Self {
        Self::Running {
            anchor_ms,
            started: Instant::now(),
            speed,
        }
    }

    /// The current moment in Unix milliseconds.
    pub fn calculated_moment(&self) -> i64 {
        match self {
            Self::Fixed(ms) => *ms,
            Self::Running {
                anchor_ms,
                started,
                speed,
            } => anchor_ms + (started.elapsed().as_secs_f64() * 1000.0 * speed) as i64,
        }
    }

    /// Scrub the moment by a signed millisecond delta.
    pub fn shift(&mut self, delta_ms: i64) {
        match self {
            Self::Fixed(ms) => *ms += delta_ms,
            Self::Running { anchor_ms, .. } => *anchor_ms += delta_ms,
        }
    }

    /// Freeze at the current moment. No-op if already frozen.
    pub fn pause(&mut self) {
        if let Self::Running { .. } = self {
            *self = Self::Fixed(self.calculated_moment());
        }
    }

    /// Resume running from the current moment at the given speed.
    pub fn resume(&mut self, speed: f64) {
        *self = Self::running_from(self.calculated_moment(), speed);
    }

    /// Whether the moment advances on its own.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}
