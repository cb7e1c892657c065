//! Gesture state machines
//!
//! Event-driven FSMs for the scroll gesture lifecycle. States are plain
//! enums; transitions are pattern matches over `(state, event)` pairs, so
//! every reachable edge is visible in one place.

use std::hash::Hash;

/// Trait for state types that transition on events
///
/// Implement on a state enum to define how events cause state changes.
/// `on_event` returns the new state, or `None` when the event does not
/// transition out of the current state.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Events driving the scroll gesture lifecycle
pub mod gesture_events {
    /// Scroll delta arrived from an active drag
    pub const DRAG: u32 = 1;
    /// Finger lifted with negligible velocity
    pub const DRAG_END: u32 = 2;
    /// Finger lifted with residual velocity (fling decay takes over)
    pub const FLING: u32 = 3;
    /// A snap animation was started
    pub const SNAP: u32 = 4;
    /// Fling or snap animation came to rest
    pub const SETTLED: u32 = 5;
}

/// Scroll gesture states for the scaffold coordinator
///
/// ```text
///                DRAG
///     Idle ───────────────► Dragging
///       ▲                    │    │
///       │ DRAG_END / SETTLED │    │ FLING
///       ├────────────────────┘    ▼
///       │ SETTLED            Flinging
///       ├──────────────────────┘ │
///       │ SETTLED                │ SNAP
///       └───────────── Snapping ◄┘
/// ```
///
/// Drag input interrupts both a running fling and a running snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    /// Nothing in motion
    #[default]
    Idle,
    /// Scroll deltas arriving from an active gesture
    Dragging,
    /// Decay animation running after finger lift
    Flinging,
    /// Animated settle toward fully expanded/collapsed
    Snapping,
}

impl GestureState {
    /// Returns true while anything is in motion
    pub fn is_active(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use gesture_events::*;

        match (self, event) {
            (GestureState::Idle, DRAG) => Some(GestureState::Dragging),

            (GestureState::Dragging, DRAG) => None,
            (GestureState::Dragging, DRAG_END) => Some(GestureState::Idle),
            (GestureState::Dragging, FLING) => Some(GestureState::Flinging),
            (GestureState::Dragging, SNAP) => Some(GestureState::Snapping),

            // User grabs the content mid-fling or mid-snap
            (GestureState::Flinging, DRAG) => Some(GestureState::Dragging),
            (GestureState::Flinging, SNAP) => Some(GestureState::Snapping),
            (GestureState::Flinging, SETTLED) => Some(GestureState::Idle),

            (GestureState::Snapping, DRAG) => Some(GestureState::Dragging),
            (GestureState::Snapping, SETTLED) => Some(GestureState::Idle),

            _ => None,
        }
    }
}

/// Snap arbitration states: either a gesture is in progress or it has ended
/// and the snap decision has been made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnapState {
    /// Scroll gesture in progress; no snap decisions yet
    Dragging,
    /// Gesture ended; any snap outcome has been dispatched
    #[default]
    Settled,
}

impl StateTransitions for SnapState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use gesture_events::*;

        match (self, event) {
            (SnapState::Settled, DRAG) => Some(SnapState::Dragging),
            (SnapState::Dragging, DRAG_END | FLING) => Some(SnapState::Settled),
            _ => None,
        }
    }
}
