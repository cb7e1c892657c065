//! Nested-scroll coordination
//!
//! [`ScrollCoordinator`] wires the scaffold into a host gesture source: every
//! raw scroll delta runs pre-scroll → body scroll → post-scroll, gesture end
//! runs the fling pipeline and then the snap decision. The host's body
//! scrolling is reached through the [`BodyScroll`] trait; the coordinator
//! never lays the body out or owns its position.

use crest_animation::{AnimationSpec, SchedulerHandle, Transition};

use crate::config::ScaffoldConfig;
use crate::fling::{DecayFling, FlingBehavior};
use crate::gesture::{gesture_events, GestureState, StateTransitions};
use crate::scaffold::ScaffoldState;
use crate::snap::SnapController;

/// The scrollable body collaborator.
///
/// `scroll_by` applies a signed delta (negative scrolls content upward) and
/// returns the portion actually consumed; the extents let the coordinator
/// detect a body that does not fill its viewport.
pub trait BodyScroll {
    fn scroll_by(&mut self, delta: f32) -> f32;
    fn content_height(&self) -> f32;
    fn viewport_height(&self) -> f32;
}

/// Where one scroll delta went
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollReport {
    /// Consumed by the strategy before the body saw the delta
    pub pre_consumed: f32,
    /// Consumed by the body's own scrolling
    pub body_consumed: f32,
    /// Overscroll absorbed after the body
    pub post_consumed: f32,
}

impl ScrollReport {
    pub fn total_consumed(&self) -> f32 {
        self.pre_consumed + self.body_consumed + self.post_consumed
    }
}

/// Outcome of a gesture end
pub struct FlingOutcome {
    /// Velocity left after toolbar, body, and overscroll all had their turn
    pub leftover_velocity: f32,
    /// Snap settle started by the controller, if any
    pub snap: Option<Transition>,
}

/// Drives a scaffold from raw scroll gestures
pub struct ScrollCoordinator {
    scaffold: ScaffoldState,
    snap: Option<SnapController>,
    fling: Box<dyn FlingBehavior>,
    gesture: GestureState,
    enabled: bool,
    expand_when_body_unfilled: bool,
    animation: AnimationSpec,
}

impl ScrollCoordinator {
    pub fn new(handle: &SchedulerHandle, config: ScaffoldConfig) -> Self {
        Self {
            scaffold: ScaffoldState::with_strategy(handle, config.strategy),
            snap: config.snap.map(SnapController::new),
            fling: Box::new(DecayFling::default()),
            gesture: GestureState::Idle,
            enabled: config.enabled,
            expand_when_body_unfilled: config.expand_when_body_unfilled,
            animation: config.animation,
        }
    }

    /// Swap in a host-provided fling decay
    pub fn with_fling_behavior(mut self, fling: Box<dyn FlingBehavior>) -> Self {
        self.fling = fling;
        self
    }

    pub fn scaffold(&self) -> &ScaffoldState {
        &self.scaffold
    }

    pub fn scaffold_mut(&mut self) -> &mut ScaffoldState {
        &mut self.scaffold
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Route one scroll delta through pre-scroll, the body, and post-scroll.
    ///
    /// With coordination disabled the body receives the whole delta.
    pub fn dispatch_scroll(&mut self, delta: f32, body: &mut dyn BodyScroll) -> ScrollReport {
        if !self.enabled {
            return ScrollReport {
                body_consumed: body.scroll_by(delta),
                ..Default::default()
            };
        }

        self.transition_gesture(gesture_events::DRAG);
        if let Some(snap) = &mut self.snap {
            snap.on_drag();
        }

        let pre_consumed = self.scaffold.pre_scroll(delta);
        let body_consumed = body.scroll_by(delta - pre_consumed);
        let post_consumed = self.scaffold.post_scroll(delta - pre_consumed - body_consumed);

        let report = ScrollReport {
            pre_consumed,
            body_consumed,
            post_consumed,
        };
        tracing::trace!(delta, ?report, "scroll dispatched");
        report
    }

    /// Finger lifted with the given velocity: run the fling pipeline
    /// (strategy pre-fling → body fling → strategy post-fling), then let the
    /// snap controller settle the toolbar.
    pub fn finish_gesture(&mut self, velocity: f32, body: &mut dyn BodyScroll) -> FlingOutcome {
        if !self.enabled {
            let leftover = self
                .fling
                .perform_fling(velocity, &mut |delta| body.scroll_by(delta));
            return FlingOutcome {
                leftover_velocity: leftover,
                snap: None,
            };
        }

        let after_pre = self.scaffold.pre_fling(&*self.fling, velocity);
        let after_body = self
            .fling
            .perform_fling(after_pre, &mut |delta| body.scroll_by(delta));
        let leftover_velocity = self.scaffold.post_fling(&*self.fling, after_body);

        let snap = match &mut self.snap {
            Some(snap) => snap.on_gesture_end(velocity, &mut self.scaffold),
            None => None,
        };

        // The decay above ran synchronously, so a fling without a snap is
        // already settled by the time we report it.
        if snap.is_some() {
            self.transition_gesture(gesture_events::SNAP);
        } else if velocity.abs() > f32::EPSILON {
            self.transition_gesture(gesture_events::FLING);
            self.transition_gesture(gesture_events::SETTLED);
        } else {
            self.transition_gesture(gesture_events::DRAG_END);
        }

        FlingOutcome {
            leftover_velocity,
            snap,
        }
    }

    /// Tell the coordinator a fling or snap animation came to rest
    pub fn note_settled(&mut self) {
        self.transition_gesture(gesture_events::SETTLED);
    }

    /// Auto-expand when the body's content does not fill its viewport.
    ///
    /// Call after body content changes. Returns the started transition, or
    /// `None` when the body fills the viewport, the toolbar is already fully
    /// expanded, or the behavior is switched off.
    pub fn sync_body_fill(&mut self, body: &dyn BodyScroll) -> Option<Transition> {
        if !self.enabled || !self.expand_when_body_unfilled {
            return None;
        }
        if body.content_height() > body.viewport_height() {
            return None;
        }
        if self.scaffold.total_progress() >= 1.0 {
            return None;
        }
        tracing::debug!("body unfilled, auto-expanding toolbar");
        Some(self.scaffold.expand(self.animation))
    }

    fn transition_gesture(&mut self, event: u32) {
        if let Some(next) = self.gesture.on_event(event) {
            tracing::trace!(from = ?self.gesture, to = ?next, "gesture transition");
            self.gesture = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::SnapConfig;
    use crate::strategy::ScrollStrategy;
    use crest_animation::AnimationScheduler;

    /// Scrollable body with its own position: 0 = at top
    struct SimBody {
        scrolled: f32,
        content: f32,
        viewport: f32,
    }

    impl SimBody {
        fn new(content: f32, viewport: f32) -> Self {
            Self {
                scrolled: 0.0,
                content,
                viewport,
            }
        }

        fn max_scroll(&self) -> f32 {
            (self.content - self.viewport).max(0.0)
        }
    }

    impl BodyScroll for SimBody {
        fn scroll_by(&mut self, delta: f32) -> f32 {
            // Negative delta scrolls content up (away from the top)
            let next = (self.scrolled - delta).clamp(0.0, self.max_scroll());
            let consumed = self.scrolled - next;
            self.scrolled = next;
            consumed
        }

        fn content_height(&self) -> f32 {
            self.content
        }

        fn viewport_height(&self) -> f32 {
            self.viewport
        }
    }

    fn coordinator(
        strategy: ScrollStrategy,
        config: impl FnOnce(ScaffoldConfig) -> ScaffoldConfig,
    ) -> (AnimationScheduler, ScrollCoordinator) {
        let scheduler = AnimationScheduler::new();
        let mut coordinator =
            ScrollCoordinator::new(&scheduler.handle(), config(ScaffoldConfig::new(strategy)));
        coordinator
            .scaffold_mut()
            .toolbar_mut()
            .set_bounds(100.0, 300.0)
            .unwrap();
        (scheduler, coordinator)
    }

    fn run_to_rest(scheduler: &AnimationScheduler) {
        for _ in 0..600 {
            if !scheduler.advance(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn test_collapse_before_body_scrolls() {
        let (_s, mut coordinator) = coordinator(ScrollStrategy::ExitUntilCollapsed, |c| c);
        let mut body = SimBody::new(2000.0, 600.0);

        // Toolbar absorbs the first drag entirely
        let report = coordinator.dispatch_scroll(-150.0, &mut body);
        assert_eq!(report.pre_consumed, -150.0);
        assert_eq!(report.body_consumed, 0.0);
        assert_eq!(body.scrolled, 0.0);
        assert_eq!(coordinator.gesture(), GestureState::Dragging);

        // Second drag: toolbar bottoms out at min height, body takes the rest
        let report = coordinator.dispatch_scroll(-200.0, &mut body);
        assert_eq!(report.pre_consumed, -50.0);
        assert_eq!(report.body_consumed, -150.0);
        assert_eq!(report.total_consumed(), -200.0);
        assert_eq!(body.scrolled, 150.0);
        assert_eq!(coordinator.scaffold().toolbar().height(), 100.0);
    }

    #[test]
    fn test_body_scrolls_back_before_toolbar_regrows() {
        let (_s, mut coordinator) = coordinator(ScrollStrategy::EnterAlwaysCollapsed, |c| c);
        let mut body = SimBody::new(2000.0, 600.0);

        coordinator.dispatch_scroll(-300.0, &mut body); // collapse height
        coordinator.dispatch_scroll(-100.0, &mut body); // hide via offset
        coordinator.dispatch_scroll(-200.0, &mut body); // body scrolls
        assert_eq!(coordinator.scaffold().toolbar().height(), 100.0);
        assert_eq!(coordinator.scaffold().offset_y(), -100.0);
        assert!(body.scrolled > 0.0);

        // Scroll down: the collapsed bar reveals first
        let report = coordinator.dispatch_scroll(60.0, &mut body);
        assert_eq!(report.pre_consumed, 60.0);
        assert_eq!(coordinator.scaffold().offset_y(), -40.0);

        // Reveal finishes, then the body unwinds back to its top
        coordinator.dispatch_scroll(40.0, &mut body);
        assert_eq!(coordinator.scaffold().offset_y(), 0.0);

        let report = coordinator.dispatch_scroll(300.0, &mut body);
        assert_eq!(report.body_consumed, 300.0);
        assert_eq!(body.scrolled, 0.0);

        // Body at its top: leftover overscroll regrows the toolbar
        let report = coordinator.dispatch_scroll(150.0, &mut body);
        assert_eq!(report.body_consumed, 0.0);
        assert_eq!(report.post_consumed, 150.0);
        assert_eq!(coordinator.scaffold().toolbar().height(), 250.0);
    }

    #[test]
    fn test_disabled_coordinator_passes_everything_to_body() {
        let (_s, mut coordinator) =
            coordinator(ScrollStrategy::ExitUntilCollapsed, |c| c.enabled(false));
        let mut body = SimBody::new(2000.0, 600.0);

        let report = coordinator.dispatch_scroll(-150.0, &mut body);
        assert_eq!(report.pre_consumed, 0.0);
        assert_eq!(report.body_consumed, -150.0);
        assert_eq!(coordinator.scaffold().toolbar().height(), 300.0);
        assert_eq!(coordinator.gesture(), GestureState::Idle);
    }

    #[test]
    fn test_slow_release_snaps_and_settles() {
        let (scheduler, mut coordinator) =
            coordinator(ScrollStrategy::ExitUntilCollapsed, |c| {
                c.with_snap(SnapConfig::new(0.5, 0.5).unwrap())
            });
        let mut body = SimBody::new(2000.0, 600.0);

        // Drag most of the collapsible range away, then release gently
        coordinator.dispatch_scroll(-180.0, &mut body);
        let outcome = coordinator.finish_gesture(0.0, &mut body);

        let snap = outcome.snap.expect("low progress snaps to collapsed");
        assert_eq!(coordinator.gesture(), GestureState::Snapping);

        run_to_rest(&scheduler);
        assert!(snap.is_finished());
        assert_eq!(coordinator.scaffold().toolbar().height(), 100.0);

        coordinator.note_settled();
        assert_eq!(coordinator.gesture(), GestureState::Idle);
    }

    #[test]
    fn test_fast_fling_reaches_body_and_skips_snap() {
        let (_s, mut coordinator) = coordinator(ScrollStrategy::ExitUntilCollapsed, |c| {
            c.with_snap(SnapConfig::new(0.5, 0.5).unwrap())
        });
        let mut body = SimBody::new(5000.0, 600.0);

        let outcome = coordinator.finish_gesture(-3000.0, &mut body);

        // Toolbar collapsed during pre-fling, body continued the fling
        assert_eq!(coordinator.scaffold().toolbar().height(), 100.0);
        assert!(body.scrolled > 0.0);
        assert!(outcome.snap.is_none());
        assert_eq!(outcome.leftover_velocity, 0.0);
    }

    #[test]
    fn test_unfilled_body_auto_expands() {
        let (scheduler, mut coordinator) = coordinator(ScrollStrategy::ExitUntilCollapsed, |c| c);
        let mut short_body = SimBody::new(400.0, 600.0);

        coordinator.dispatch_scroll(-200.0, &mut short_body);
        assert_eq!(coordinator.scaffold().toolbar().height(), 100.0);

        let transition = coordinator
            .sync_body_fill(&short_body)
            .expect("short body should trigger expand");
        run_to_rest(&scheduler);
        assert!(transition.is_finished());
        assert_eq!(coordinator.scaffold().toolbar().height(), 300.0);

        // Already expanded: nothing more to do
        assert!(coordinator.sync_body_fill(&short_body).is_none());
    }

    #[test]
    fn test_unfilled_check_respects_opt_out() {
        let (_s, mut coordinator) = coordinator(ScrollStrategy::ExitUntilCollapsed, |c| {
            c.expand_when_body_unfilled(false)
        });
        let mut short_body = SimBody::new(400.0, 600.0);

        coordinator.dispatch_scroll(-200.0, &mut short_body);
        assert!(coordinator.sync_body_fill(&short_body).is_none());
        assert_eq!(coordinator.scaffold().toolbar().height(), 100.0);
    }
}
