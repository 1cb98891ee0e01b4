//! Frame pacing for the animation-frame driver

/// Gates a display-rate callback down to the simulation frame rate.
///
/// Callbacks arriving sooner than `interval_ms` after the last accepted frame
/// are skipped entirely; the clock does not accumulate them.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl FrameThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Offer a timestamp. Returns the milliseconds since the previous accepted
    /// frame when this one should run, `None` when it should be skipped.
    ///
    /// The first call after construction or [`FrameThrottle::rearm`] runs with
    /// a nominal one-interval delta.
    pub fn poll(&mut self, now_ms: f64) -> Option<f64> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return Some(self.interval_ms);
        };
        let elapsed = now_ms - last;
        if elapsed < self.interval_ms {
            return None;
        }
        self.last_ms = Some(now_ms);
        Some(elapsed)
    }

    /// Restart timing from `now_ms`, so time spent suspended is never reported
    pub fn rearm(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
