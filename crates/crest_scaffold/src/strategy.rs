//! Scroll strategies
//!
//! The closed set of policies deciding how a scroll delta is split between
//! the toolbar (height/offset movement) and the body's own scrolling. Each
//! variant dispatches to its own handler; the set is enumerable, so this is a
//! tagged enum rather than trait objects.
//!
//! Sign convention: deltas are pixels, negative for an upward drag (the
//! collapsing direction), positive for a downward drag (revealing). Every
//! hook returns the signed portion it consumed; the caller forwards the
//! remainder to the body.
//!
//! Consumption never splits one delta across offset and height in the same
//! call: the first quantity in the variant's order that can still move takes
//! what it can, and the rest goes to the body. Direction reversals re-evaluate
//! that order on every call, so pending height movement is always flushed
//! before the offset is touched in the collapse direction.

use std::fmt;
use std::str::FromStr;

use crate::error::ScaffoldError;
use crate::fling::FlingBehavior;
use crate::scaffold::ScaffoldState;

/// Policy splitting scroll deltas between toolbar collapse and body scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollStrategy {
    /// The toolbar slides in/out with the scroll immediately, in both
    /// directions, by moving the scaffold offset. Height never changes.
    EnterAlways,
    /// Like [`EnterAlways`](Self::EnterAlways) for the offset, but the
    /// toolbar's own collapsible region collapses before the offset moves,
    /// and regrows only once the body has scrolled back to its top.
    EnterAlwaysCollapsed,
    /// The toolbar stays put and collapses in place; the offset never moves.
    /// Scroll reaches the body only once the toolbar is fully collapsed.
    ExitUntilCollapsed,
}

impl ScrollStrategy {
    /// Stable name used in persistence snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollStrategy::EnterAlways => "enter_always",
            ScrollStrategy::EnterAlwaysCollapsed => "enter_always_collapsed",
            ScrollStrategy::ExitUntilCollapsed => "exit_until_collapsed",
        }
    }

    /// Consume part of `delta` before the body scrolls
    pub fn pre_scroll(self, state: &mut ScaffoldState, delta: f32) -> f32 {
        match self {
            ScrollStrategy::EnterAlways => enter_always_pre(state, delta),
            ScrollStrategy::EnterAlwaysCollapsed => enter_always_collapsed_pre(state, delta),
            ScrollStrategy::ExitUntilCollapsed => exit_until_collapsed_pre(state, delta),
        }
    }

    /// Absorb body overscroll, mirroring the pre-scroll order in reverse
    pub fn post_scroll(self, state: &mut ScaffoldState, remaining: f32) -> f32 {
        match self {
            ScrollStrategy::EnterAlways => enter_always_post(state, remaining),
            ScrollStrategy::EnterAlwaysCollapsed => enter_always_collapsed_post(state, remaining),
            ScrollStrategy::ExitUntilCollapsed => exit_until_collapsed_post(state, remaining),
        }
    }

    /// Run the fling decay against this strategy's pre-scroll consumption.
    ///
    /// Returns the unconsumed velocity for the body's own fling.
    pub fn pre_fling(
        self,
        state: &mut ScaffoldState,
        fling: &dyn FlingBehavior,
        velocity: f32,
    ) -> f32 {
        let leftover = fling.perform_fling(velocity, &mut |delta| self.pre_scroll(state, delta));
        tracing::debug!(strategy = %self, velocity, leftover, "pre-fling");
        leftover
    }

    /// Run the fling decay against this strategy's post-scroll consumption
    pub fn post_fling(
        self,
        state: &mut ScaffoldState,
        fling: &dyn FlingBehavior,
        velocity: f32,
    ) -> f32 {
        let leftover = fling.perform_fling(velocity, &mut |delta| self.post_scroll(state, delta));
        tracing::debug!(strategy = %self, velocity, leftover, "post-fling");
        leftover
    }
}

impl fmt::Display for ScrollStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScrollStrategy {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enter_always" => Ok(ScrollStrategy::EnterAlways),
            "enter_always_collapsed" => Ok(ScrollStrategy::EnterAlwaysCollapsed),
            "exit_until_collapsed" => Ok(ScrollStrategy::ExitUntilCollapsed),
            other => Err(ScaffoldError::UnknownStrategy(other.to_string())),
        }
    }
}

// ============================================================================
// EnterAlways: offset only, both directions
// ============================================================================

fn enter_always_pre(state: &mut ScaffoldState, delta: f32) -> f32 {
    state.dispatch_offset_delta(delta)
}

fn enter_always_post(state: &mut ScaffoldState, remaining: f32) -> f32 {
    // Pre-scroll already moves the offset in both directions; this only
    // matters when the body was handed a delta it could not take.
    state.dispatch_offset_delta(remaining)
}

// ============================================================================
// EnterAlwaysCollapsed: height before offset when collapsing, offset first
// when revealing, height regrowth deferred to post-scroll
// ============================================================================

fn enter_always_collapsed_pre(state: &mut ScaffoldState, delta: f32) -> f32 {
    if delta < 0.0 {
        if state.toolbar().height() > state.toolbar().min_height() {
            state.toolbar_mut().dispatch_delta(delta)
        } else {
            state.dispatch_offset_delta(delta)
        }
    } else if delta > 0.0 {
        // Reveal the (collapsed) bar; regrowing the height waits until the
        // body has scrolled back to its top and overscrolls into post_scroll.
        state.dispatch_offset_delta(delta)
    } else {
        0.0
    }
}

fn enter_always_collapsed_post(state: &mut ScaffoldState, remaining: f32) -> f32 {
    if remaining > 0.0 {
        if state.offset_y() < 0.0 {
            state.dispatch_offset_delta(remaining)
        } else {
            state.toolbar_mut().dispatch_delta(remaining)
        }
    } else if remaining < 0.0 {
        if state.offset_y() > -state.toolbar().min_height() {
            state.dispatch_offset_delta(remaining)
        } else {
            state.toolbar_mut().dispatch_delta(remaining)
        }
    } else {
        0.0
    }
}

// ============================================================================
// ExitUntilCollapsed: height only, offset pinned at zero
// ============================================================================

fn exit_until_collapsed_pre(state: &mut ScaffoldState, delta: f32) -> f32 {
    state.toolbar_mut().dispatch_delta(delta)
}

fn exit_until_collapsed_post(state: &mut ScaffoldState, remaining: f32) -> f32 {
    state.toolbar_mut().dispatch_delta(remaining)
}
