//! Fixed-duration tween animations
//!
//! A tween drives a value from a start point to a target over a fixed
//! duration, shaped by an easing curve. Zero-duration tweens complete
//! immediately.

use crate::easing::Easing;

/// A two-endpoint timed animation
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    easing: Easing,
    elapsed_ms: f32,
    playing: bool,
}

impl Tween {
    /// Create a tween, already playing
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            elapsed_ms: 0.0,
            playing: duration_ms > 0,
        }
    }

    /// Get progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Get the current interpolated value
    pub fn value(&self) -> f32 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// The value this tween is driving toward
    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Finished means the tween ran to its end (or had zero duration)
    pub fn is_finished(&self) -> bool {
        !self.playing && self.progress() >= 1.0
    }

    /// Stop in place; the current value stays readable
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Advance animation by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.elapsed_ms += dt_ms;

        if self.elapsed_ms >= self.duration_ms as f32 {
            self.elapsed_ms = self.duration_ms as f32;
            self.playing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target_exactly() {
        let mut tween = Tween::new(300.0, 100.0, 200, Easing::EaseInOut);
        assert!(tween.is_playing());

        tween.tick(100.0);
        let mid = tween.value();
        assert!(mid < 300.0 && mid > 100.0);

        tween.tick(150.0);
        assert!(!tween.is_playing());
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 100.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let tween = Tween::new(0.0, 50.0, 0, Easing::Linear);
        assert!(!tween.is_playing());
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 50.0);
    }

    #[test]
    fn test_stop_freezes_value() {
        let mut tween = Tween::new(0.0, 100.0, 1000, Easing::Linear);
        tween.tick(250.0);
        tween.stop();

        let frozen = tween.value();
        assert!((frozen - 25.0).abs() < 1e-4);
        assert!(!tween.is_finished()); // stopped, not finished

        tween.tick(500.0);
        assert_eq!(tween.value(), frozen);
    }
}
