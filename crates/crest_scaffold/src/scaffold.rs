//! Scaffold offset state and coordinated transitions
//!
//! [`ScaffoldState`] owns the vertical offset of the whole toolbar+body block
//! (how far it has shifted upward), the [`ToolbarState`], and the configured
//! scroll strategy. Progress metrics are pure derived reads, recomputed from
//! the current offset and toolbar height on every access.
//!
//! `expand`/`collapse` animate the offset and the toolbar height as two
//! concurrent tracks under one timing spec, joined in a [`Transition`] that
//! finishes only when both settle and cancels both as a unit.

use crest_animation::{AnimatedCell, AnimationSpec, SchedulerHandle, TrackId, Transition};

use crate::fling::FlingBehavior;
use crate::strategy::ScrollStrategy;
use crate::toolbar::ToolbarState;

/// Offset and coordination state of a collapsing-toolbar scaffold
pub struct ScaffoldState {
    toolbar: ToolbarState,
    offset: AnimatedCell,
    strategy: Option<ScrollStrategy>,
    handle: SchedulerHandle,
}

impl ScaffoldState {
    /// Create a scaffold with no strategy configured yet
    pub fn new(handle: &SchedulerHandle) -> Self {
        Self {
            toolbar: ToolbarState::new(handle.clone()),
            offset: AnimatedCell::new(handle.clone(), 0.0),
            strategy: None,
            handle: handle.clone(),
        }
    }

    /// Create a scaffold with the given strategy installed
    pub fn with_strategy(handle: &SchedulerHandle, strategy: ScrollStrategy) -> Self {
        let mut state = Self::new(handle);
        state.strategy = Some(strategy);
        state
    }

    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut ToolbarState {
        &mut self.toolbar
    }

    /// The active scroll strategy, if one is configured
    pub fn strategy(&self) -> Option<ScrollStrategy> {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Option<ScrollStrategy>) {
        self.strategy = strategy;
    }

    /// Valid offset range under the active strategy
    fn offset_bounds(&self) -> (f32, f32) {
        match self.strategy {
            Some(ScrollStrategy::ExitUntilCollapsed) => (0.0, 0.0),
            _ => (-self.toolbar.min_height(), 0.0),
        }
    }

    /// Current vertical offset of the toolbar+body block (≤ 0), clamped into
    /// the range the active strategy allows
    pub fn offset_y(&self) -> f32 {
        let (lo, hi) = self.offset_bounds();
        self.offset.get().clamp(lo, hi)
    }

    /// Consume a raw offset delta, clamped into the strategy's range.
    ///
    /// Cancels any in-flight offset animation and returns the signed portion
    /// actually consumed. Under `ExitUntilCollapsed` the offset is pinned at
    /// zero and nothing is ever consumed.
    pub fn dispatch_offset_delta(&mut self, raw: f32) -> f32 {
        let (lo, hi) = self.offset_bounds();
        let offset = self.offset_y();
        let next = (offset + raw).clamp(lo, hi);
        self.offset.set_immediate(next);
        let consumed = next - offset;
        tracing::trace!(raw, consumed, offset = next, "scaffold offset delta");
        consumed
    }

    /// Offset-only progress in [0, 1]: 1 with the block fully on screen, 0
    /// with it shifted up by the toolbar's min height.
    ///
    /// Constant 1 under `ExitUntilCollapsed` (the offset is unused) and while
    /// no strategy is configured.
    pub fn offset_progress(&self) -> f32 {
        match self.strategy {
            Some(ScrollStrategy::EnterAlways) | Some(ScrollStrategy::EnterAlwaysCollapsed) => {
                let min_height = self.toolbar.min_height();
                if min_height <= 0.0 {
                    return 1.0;
                }
                1.0 - (-self.offset_y() / min_height).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    /// Combined progress of offset and toolbar height in [0, 1]
    pub fn total_progress(&self) -> f32 {
        let max_height = self.toolbar.max_height();
        if max_height <= 0.0 {
            return 1.0;
        }
        ((self.offset_y() + self.toolbar.height()) / max_height).clamp(0.0, 1.0)
    }

    /// Animate the offset back to zero.
    ///
    /// No-op under `ExitUntilCollapsed`, which never moves the offset.
    pub fn offset_expand(&mut self, spec: AnimationSpec) -> Option<TrackId> {
        if matches!(self.strategy, Some(ScrollStrategy::ExitUntilCollapsed)) {
            return None;
        }
        self.normalize_offset();
        self.offset.animate_to(0.0, spec)
    }

    /// Animate the offset to `-min_height` (block shifted fully up).
    ///
    /// No-op under `ExitUntilCollapsed`.
    pub fn offset_collapse(&mut self, spec: AnimationSpec) -> Option<TrackId> {
        if matches!(self.strategy, Some(ScrollStrategy::ExitUntilCollapsed)) {
            return None;
        }
        self.normalize_offset();
        self.offset.animate_to(-self.toolbar.min_height(), spec)
    }

    /// Expand offset and toolbar height together.
    ///
    /// Both tracks run concurrently under the same spec; the returned
    /// transition finishes once both settle and cancels both together.
    /// Starting a new transition replaces any in-flight animation on either
    /// field.
    pub fn expand(&mut self, spec: AnimationSpec) -> Transition {
        tracing::debug!("scaffold expand");
        let offset_track = self.offset_expand(spec);
        let height_track = self.toolbar.expand(spec);
        Transition::from_tracks(self.handle.clone(), [offset_track, height_track])
    }

    /// Collapse offset and toolbar height together; see [`Self::expand`]
    pub fn collapse(&mut self, spec: AnimationSpec) -> Transition {
        tracing::debug!("scaffold collapse");
        let offset_track = self.offset_collapse(spec);
        let height_track = self.toolbar.collapse(spec);
        Transition::from_tracks(self.handle.clone(), [offset_track, height_track])
    }

    /// Check if any offset or height animation is in flight
    pub fn is_animating(&self) -> bool {
        self.offset.is_animating() || self.toolbar.is_animating()
    }

    // =========================================================================
    // Nested-scroll hooks (delegate to the configured strategy)
    // =========================================================================

    /// Consume part of a scroll delta before the body sees it.
    ///
    /// Returns the signed consumed portion; with no strategy configured the
    /// whole delta passes through.
    pub fn pre_scroll(&mut self, delta: f32) -> f32 {
        match self.strategy {
            Some(strategy) => strategy.pre_scroll(self, delta),
            None => 0.0,
        }
    }

    /// Absorb what the body left unconsumed (overscroll)
    pub fn post_scroll(&mut self, remaining: f32) -> f32 {
        match self.strategy {
            Some(strategy) => strategy.post_scroll(self, remaining),
            None => 0.0,
        }
    }

    /// Run the fling decay against toolbar/offset before the body flings.
    ///
    /// Returns the unconsumed velocity for the body's own fling.
    pub fn pre_fling(&mut self, fling: &dyn FlingBehavior, velocity: f32) -> f32 {
        match self.strategy {
            Some(strategy) => strategy.pre_fling(self, fling, velocity),
            None => velocity,
        }
    }

    /// Absorb residual fling velocity after the body's fling
    pub fn post_fling(&mut self, fling: &dyn FlingBehavior, velocity: f32) -> f32 {
        match self.strategy {
            Some(strategy) => strategy.post_fling(self, fling, velocity),
            None => velocity,
        }
    }

    /// Write an offset directly (snapshot restore); reads clamp into range
    pub(crate) fn write_offset(&mut self, offset: f32) {
        self.offset.set_immediate(offset);
    }

    /// Fold any out-of-range stored offset back into range before animating
    fn normalize_offset(&mut self) {
        let clamped = self.offset_y();
        if (self.offset.get() - clamped).abs() > f32::EPSILON {
            self.offset.set_immediate(clamped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crest_animation::AnimationScheduler;

    fn measured_scaffold(
        scheduler: &AnimationScheduler,
        strategy: ScrollStrategy,
    ) -> ScaffoldState {
        let mut state = ScaffoldState::with_strategy(&scheduler.handle(), strategy);
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
    fn test_offset_clamped_to_strategy_range() {
        let scheduler = AnimationScheduler::new();
        let mut state = measured_scaffold(&scheduler, ScrollStrategy::EnterAlways);

        assert_eq!(state.dispatch_offset_delta(-60.0), -60.0);
        assert_eq!(state.offset_y(), -60.0);

        // Only 40 left before -min_height
        assert_eq!(state.dispatch_offset_delta(-70.0), -40.0);
        assert_eq!(state.offset_y(), -100.0);

        assert_eq!(state.dispatch_offset_delta(150.0), 100.0);
        assert_eq!(state.offset_y(), 0.0);
    }

    #[test]
    fn test_exit_until_collapsed_pins_offset() {
        let scheduler = AnimationScheduler::new();
        let mut state = measured_scaffold(&scheduler, ScrollStrategy::ExitUntilCollapsed);

        assert_eq!(state.dispatch_offset_delta(-50.0), 0.0);
        assert_eq!(state.offset_y(), 0.0);
        assert!(state.offset_collapse(AnimationSpec::default()).is_none());
        assert_eq!(state.offset_progress(), 1.0);
    }

    #[test]
    fn test_offset_progress_tracks_offset() {
        let scheduler = AnimationScheduler::new();
        let mut state = measured_scaffold(&scheduler, ScrollStrategy::EnterAlways);

        assert_eq!(state.offset_progress(), 1.0);
        state.dispatch_offset_delta(-50.0);
        assert!((state.offset_progress() - 0.5).abs() < 1e-6);
        state.dispatch_offset_delta(-50.0);
        assert_eq!(state.offset_progress(), 0.0);
    }

    #[test]
    fn test_total_progress_combines_offset_and_height() {
        let scheduler = AnimationScheduler::new();
        let mut state = measured_scaffold(&scheduler, ScrollStrategy::EnterAlwaysCollapsed);

        // Fully expanded, fully on screen
        assert_eq!(state.total_progress(), 1.0);

        state.toolbar_mut().dispatch_delta(-200.0); // height 100
        state.dispatch_offset_delta(-100.0); // offset -100
        assert_eq!(state.total_progress(), 0.0);

        state.dispatch_offset_delta(50.0);
        assert!((state.total_progress() - (50.0 / 300.0)).abs() < 1e-6);
    }

    #[test]
    fn test_expand_joins_offset_and_height_tracks() {
        let scheduler = AnimationScheduler::new();
        let mut state = measured_scaffold(&scheduler, ScrollStrategy::EnterAlwaysCollapsed);
        state.toolbar_mut().dispatch_delta(-200.0);
        state.dispatch_offset_delta(-100.0);

        let transition = state.expand(AnimationSpec::tween(300));
        assert_eq!(transition.tracks().len(), 2);
        assert!(!transition.is_finished());

        run_to_rest(&scheduler);
        assert!(transition.is_finished());
        assert_eq!(state.offset_y(), 0.0);
        assert_eq!(state.toolbar().height(), 300.0);
        assert_eq!(state.total_progress(), 1.0);
    }

    #[test]
    fn test_new_transition_replaces_in_flight_animation() {
        let scheduler = AnimationScheduler::new();
        let mut state = measured_scaffold(&scheduler, ScrollStrategy::EnterAlwaysCollapsed);
        state.toolbar_mut().dispatch_delta(-200.0);
        state.dispatch_offset_delta(-100.0);

        let expand = state.expand(AnimationSpec::tween(1000));
        scheduler.advance(0.1);

        // Reversing mid-flight replaces both tracks; the old ones are gone
        // from the scheduler, so the stale transition reads as finished.
        let collapse = state.collapse(AnimationSpec::tween(200));
        assert!(expand.is_finished());

        run_to_rest(&scheduler);
        assert!(collapse.is_finished());
        assert_eq!(state.toolbar().height(), 100.0);
        assert_eq!(state.offset_y(), -100.0);
    }

    #[test]
    fn test_transition_cancel_freezes_both_fields() {
        let scheduler = AnimationScheduler::new();
        let mut state = measured_scaffold(&scheduler, ScrollStrategy::EnterAlwaysCollapsed);
        state.toolbar_mut().dispatch_delta(-200.0);
        state.dispatch_offset_delta(-100.0);

        let transition = state.expand(AnimationSpec::tween(1000));
        scheduler.advance(0.3);
        transition.cancel();

        let (height, offset) = (state.toolbar().height(), state.offset_y());
        assert!(height > 100.0 && height < 300.0);
        assert!(offset > -100.0 && offset < 0.0);

        scheduler.advance(0.5);
        assert_eq!(state.toolbar().height(), height);
        assert_eq!(state.offset_y(), offset);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_hooks_without_strategy_pass_everything_through() {
        let scheduler = AnimationScheduler::new();
        let mut state = ScaffoldState::new(&scheduler.handle());
        state.toolbar_mut().set_bounds(100.0, 300.0).unwrap();

        assert_eq!(state.pre_scroll(-50.0), 0.0);
        assert_eq!(state.post_scroll(30.0), 0.0);
        assert_eq!(state.toolbar().height(), 300.0);
        assert_eq!(state.offset_y(), 0.0);
    }
}
