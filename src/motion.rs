//! Time sources for everything that moves: the per-frame animation clock and
//! fixed-duration tweens sampled by it.

use std::time::Duration;

/// Elapsed time since the page started animating. Samples never go
/// backwards even if the host timestamp does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    origin_ms: Option<f64>,
    elapsed_seconds: f64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            origin_ms: None,
            elapsed_seconds: 0.0,
        }
    }

    /// Records a frame timestamp (milliseconds, host clock) and returns the
    /// elapsed seconds. The first sample defines zero.
    pub fn sample(&mut self, now_ms: f64) -> f64 {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let elapsed = ((now_ms - origin) / 1_000.0).max(0.0);
        if elapsed > self.elapsed_seconds {
            self.elapsed_seconds = elapsed;
        }
        self.elapsed_seconds
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed_seconds
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInOutCubic,
    EaseOutCubic,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A fixed-duration animation started at a host timestamp. Raw progress is
/// linear in time, clamped to `0..=1`, and never decreases between samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
    progress: f64,
}

impl Tween {
    pub fn start(now_ms: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            start_ms: now_ms,
            duration_ms: duration.as_secs_f64() * 1_000.0,
            easing,
            progress: 0.0,
        }
    }

    /// Advances to `now_ms` and returns the raw (uneased) progress.
    pub fn sample(&mut self, now_ms: f64) -> f64 {
        let raw = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
        };
        if raw > self.progress {
            self.progress = raw;
        }
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn eased(&self) -> f64 {
        self.easing.apply(self.progress)
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Host timestamp at which the tween reaches full progress.
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero_and_never_rewinds() {
        let mut clock = AnimationClock::new();
        assert_eq!(clock.sample(5_000.0), 0.0);
        assert_eq!(clock.sample(6_500.0), 1.5);
        assert_eq!(clock.sample(6_000.0), 1.5);
        assert_eq!(clock.elapsed(), 1.5);
    }

    #[test]
    fn easing_hits_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOutCubic, Easing::EaseOutCubic] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
        assert_eq!(Easing::EaseInOutCubic.apply(0.5), 0.5);
    }

    #[test]
    fn tween_progress_is_clamped_and_monotonic() {
        let mut tween = Tween::start(100.0, Duration::from_millis(200), Easing::Linear);
        assert_eq!(tween.progress(), 0.0);
        assert_eq!(tween.sample(50.0), 0.0);
        assert_eq!(tween.sample(200.0), 0.5);
        assert_eq!(tween.sample(150.0), 0.5);
        assert!(!tween.is_finished());
        assert_eq!(tween.sample(10_000.0), 1.0);
        assert!(tween.is_finished());
        assert_eq!(tween.end_ms(), 300.0);
    }

    #[test]
    fn zero_duration_tween_finishes_immediately() {
        let mut tween = Tween::start(0.0, Duration::ZERO, Easing::EaseOutCubic);
        assert_eq!(tween.sample(0.0), 1.0);
        assert_eq!(tween.eased(), 1.0);
    }
}
