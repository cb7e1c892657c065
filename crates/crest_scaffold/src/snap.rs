//! Post-gesture snapping
//!
//! When a scroll gesture ends near one of the toolbar's canonical states, the
//! snap controller animates the rest of the way instead of leaving the header
//! half-open. A fast enough fling skips snapping entirely and the decay curve
//! decides the terminal state.

use crest_animation::{AnimationSpec, Transition};

use crate::error::{Result, ScaffoldError};
use crate::gesture::{gesture_events, SnapState, StateTransitions};
use crate::scaffold::ScaffoldState;

/// Snap behavior configuration (immutable value object)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapConfig {
    /// Velocity magnitude above which snapping is skipped and the natural
    /// fling decay finishes on its own (pixels/second)
    pub fling_threshold: f32,
    /// Snap toward collapsed when total progress is at or below this
    pub collapsed_snap_threshold: f32,
    /// Snap toward expanded when total progress is at or above this
    pub expanded_snap_threshold: f32,
    /// Timing of the snap animation
    pub animation: AnimationSpec,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            fling_threshold: 1000.0,
            collapsed_snap_threshold: 0.5,
            expanded_snap_threshold: 0.5,
            animation: AnimationSpec::default(),
        }
    }
}

impl SnapConfig {
    /// Create a config with validated progress thresholds
    pub fn new(collapsed_snap_threshold: f32, expanded_snap_threshold: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&collapsed_snap_threshold) {
            return Err(ScaffoldError::InvalidSnapThreshold {
                name: "collapsed_snap_threshold",
                value: collapsed_snap_threshold,
            });
        }
        if !(0.0..=1.0).contains(&expanded_snap_threshold) {
            return Err(ScaffoldError::InvalidSnapThreshold {
                name: "expanded_snap_threshold",
                value: expanded_snap_threshold,
            });
        }
        Ok(Self {
            collapsed_snap_threshold,
            expanded_snap_threshold,
            ..Default::default()
        })
    }

    pub fn with_fling_threshold(mut self, fling_threshold: f32) -> Self {
        self.fling_threshold = fling_threshold;
        self
    }

    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }
}

/// Arbitrates the settle after each scroll gesture
pub struct SnapController {
    config: SnapConfig,
    state: SnapState,
}

impl SnapController {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            state: SnapState::Settled,
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn state(&self) -> SnapState {
        self.state
    }

    /// Note active drag input
    pub fn on_drag(&mut self) {
        if let Some(next) = self.state.on_event(gesture_events::DRAG) {
            self.state = next;
        }
    }

    /// Gesture ended with the given release velocity.
    ///
    /// Transitions Dragging → Settled and decides the snap: a release faster
    /// than the fling threshold defers to the decay curve; otherwise the
    /// current total progress picks collapsed, expanded, or the dead zone in
    /// between (no snap).
    pub fn on_gesture_end(
        &mut self,
        velocity: f32,
        scaffold: &mut ScaffoldState,
    ) -> Option<Transition> {
        if let Some(next) = self.state.on_event(gesture_events::FLING) {
            self.state = next;
        }

        if velocity.abs() > self.config.fling_threshold {
            tracing::debug!(velocity, "snap skipped, deferring to fling decay");
            return None;
        }

        let progress = scaffold.total_progress();
        if progress <= self.config.collapsed_snap_threshold {
            tracing::debug!(progress, "snapping to collapsed");
            Some(scaffold.collapse(self.config.animation))
        } else if progress >= self.config.expanded_snap_threshold {
            tracing::debug!(progress, "snapping to expanded");
            Some(scaffold.expand(self.config.animation))
        } else {
            tracing::debug!(progress, "snap dead zone, leaving state as-is");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::ScrollStrategy;
    use crest_animation::AnimationScheduler;

    fn collapsed_leaning_scaffold(scheduler: &AnimationScheduler) -> ScaffoldState {
        let mut state =
            ScaffoldState::with_strategy(&scheduler.handle(), ScrollStrategy::ExitUntilCollapsed);
        state.toolbar_mut().set_bounds(100.0, 300.0).unwrap();
        state
    }

    fn run_to_rest(scheduler: &AnimationScheduler) {
        for _ in 0..600 {
            if !scheduler.advance(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn test_low_progress_slow_release_snaps_collapsed() {
        let scheduler = AnimationScheduler::new();
        let mut state =
            ScaffoldState::with_strategy(&scheduler.handle(), ScrollStrategy::ExitUntilCollapsed);
        state.toolbar_mut().set_bounds(20.0, 300.0).unwrap();
        state.pre_scroll(-270.0); // height 30, total progress 0.1

        let config = SnapConfig::new(0.2, 0.8).unwrap();
        let mut snap = SnapController::new(config);
        snap.on_drag();

        let transition = snap.on_gesture_end(200.0, &mut state);
        assert_eq!(snap.state(), SnapState::Settled);
        let transition = transition.expect("progress 0.1 is inside the collapse band");

        run_to_rest(&scheduler);
        assert!(transition.is_finished());
        assert_eq!(state.toolbar().height(), 20.0);
        assert_eq!(state.total_progress(), 20.0 / 300.0);
    }

    #[test]
    fn test_high_progress_snaps_expanded() {
        let scheduler = AnimationScheduler::new();
        let mut state = collapsed_leaning_scaffold(&scheduler);
        state.pre_scroll(-30.0); // height 270, progress 0.9

        let mut snap = SnapController::new(SnapConfig::new(0.2, 0.8).unwrap());
        snap.on_drag();
        let transition = snap.on_gesture_end(-100.0, &mut state).unwrap();

        run_to_rest(&scheduler);
        assert!(transition.is_finished());
        assert_eq!(state.toolbar().height(), 300.0);
    }

    #[test]
    fn test_dead_zone_leaves_state_as_is() {
        let scheduler = AnimationScheduler::new();
        let mut state = collapsed_leaning_scaffold(&scheduler);
        state.pre_scroll(-150.0); // height 150, progress 0.5

        let mut snap = SnapController::new(SnapConfig::new(0.2, 0.8).unwrap());
        snap.on_drag();
        assert!(snap.on_gesture_end(0.0, &mut state).is_none());
        assert_eq!(state.toolbar().height(), 150.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_fast_fling_skips_snap() {
        let scheduler = AnimationScheduler::new();
        let mut state = collapsed_leaning_scaffold(&scheduler);
        state.pre_scroll(-250.0); // low progress, would snap collapsed

        let mut snap = SnapController::new(SnapConfig::new(0.5, 0.5).unwrap());
        snap.on_drag();
        assert!(snap.on_gesture_end(-2500.0, &mut state).is_none());
        assert!(!state.is_animating());
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert_eq!(
            SnapConfig::new(-0.1, 0.5),
            Err(ScaffoldError::InvalidSnapThreshold {
                name: "collapsed_snap_threshold",
                value: -0.1,
            })
        );
        assert!(SnapConfig::new(0.5, 1.5).is_err());
    }
}
