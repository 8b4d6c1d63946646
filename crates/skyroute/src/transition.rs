//! Timed interpolation driven by the frame clock.

use skyroute_core::geom::Point;
use std::time::Duration;

/// Symmetric cubic easing (`easeCubicInOut`).
pub fn cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Start time and length of one transition. Times are offsets on the session clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub start: Duration,
    pub duration: Duration,
}

impl Timing {
    pub fn new(start: Duration, duration: Duration) -> Self {
        Self { start, duration }
    }

    /// Linear progress in `[0, 1]`. A zero duration completes immediately.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_done(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}

/// A scalar tween (overlay opacity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub timing: Timing,
}

impl Tween {
    /// Eased value at `now`. Exactly `to` once complete.
    pub fn value(&self, now: Duration) -> f64 {
        let t = self.timing.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * cubic_in_out(t)
    }
}

pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    a.lerp(b, t)
}

#[cfg(test)]
mod tests {
    use super::{Timing, Tween, cubic_in_out};
    use std::time::Duration;

    #[test]
    fn cubic_in_out_endpoints_and_midpoint() {
        assert_eq!(cubic_in_out(0.0), 0.0);
        assert_eq!(cubic_in_out(0.5), 0.5);
        assert_eq!(cubic_in_out(1.0), 1.0);
        assert!(cubic_in_out(0.25) < 0.25);
        assert!(cubic_in_out(0.75) > 0.75);
        assert_eq!(cubic_in_out(-3.0), 0.0);
    }

    #[test]
    fn zero_duration_completes_at_once() {
        let t = Timing::new(Duration::from_millis(10), Duration::ZERO);
        assert_eq!(t.progress(Duration::ZERO), 1.0);
    }

    #[test]
    fn tween_lands_exactly_on_target() {
        let tw = Tween {
            from: 0.3,
            to: 0.7,
            timing: Timing::new(Duration::ZERO, Duration::from_millis(500)),
        };
        assert_eq!(tw.value(Duration::ZERO), 0.3);
        assert_eq!(tw.value(Duration::from_millis(500)), 0.7);
        assert_eq!(tw.value(Duration::from_secs(9)), 0.7);
        let mid = tw.value(Duration::from_millis(250));
        assert!((mid - 0.5).abs() < 1e-12);
    }
}
