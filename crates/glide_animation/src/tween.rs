//! Timed interpolation of a single numeric property

use crate::easing::Easing;

/// Interpolates from a start value to an end value over a fixed duration
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Advance by `dt_ms` and return the new value
    pub fn tick(&mut self, dt_ms: f32) -> f32 {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
        self.value()
    }

    /// Progress in 0.0..=1.0
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            self.elapsed_ms / self.duration_ms
        }
    }

    pub fn value(&self) -> f32 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween_midpoint_and_end() {
        let mut tween = Tween::new(0.6, 0.0, 300.0, Easing::Linear);
        assert_eq!(tween.value(), 0.6);

        let mid = tween.tick(150.0);
        assert!((mid - 0.3).abs() < 1e-6);
        assert!(!tween.is_finished());

        assert_eq!(tween.tick(1000.0), 0.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tween = Tween::new(1.0, 0.0, 0.0, Easing::EaseOut);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 0.0);
    }
}
