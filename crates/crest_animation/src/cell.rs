//! Animated value cells and joined transitions
//!
//! An [`AnimatedCell`] is an observable scalar with single-writer discipline:
//! the owning state object is the only writer, a render layer only reads.
//! Direct writes (`set_immediate`) cancel any in-flight animation, and
//! starting a new animation replaces the previous one, so two animations
//! never race on the same cell. Cancellation is silent; it is the expected
//! effect of interrupting a transition, not an error.
//!
//! A [`Transition`] joins several tracks (e.g. a header height and a layout
//! offset animated together) and reports finished only when every track has
//! settled. Cancelling the transition halts all of its tracks as a unit.

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::scheduler::{SchedulerHandle, TrackId};
use crate::spring::{Spring, SpringConfig};
use crate::tween::Tween;

/// Timing descriptor for an animated transition.
///
/// The default is the spring variant, which is what "no explicit duration"
/// means throughout the configuration surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationSpec {
    /// Physics-based timing
    Spring(SpringConfig),
    /// Fixed-duration eased timing
    Tween { duration_ms: u32, easing: Easing },
}

impl Default for AnimationSpec {
    fn default() -> Self {
        AnimationSpec::Spring(SpringConfig::settle())
    }
}

impl AnimationSpec {
    /// Fixed-duration tween with the standard ease-in-out curve
    pub fn tween(duration_ms: u32) -> Self {
        AnimationSpec::Tween {
            duration_ms,
            easing: Easing::EaseInOut,
        }
    }

    /// Resolve an optional frame duration: `None` selects spring-based
    /// default timing, `Some(ms)` a fixed-duration tween.
    pub fn from_duration(duration_ms: Option<u32>) -> Self {
        match duration_ms {
            None => AnimationSpec::default(),
            Some(ms) => AnimationSpec::tween(ms),
        }
    }
}

/// An observable scalar that can be written directly or driven by one
/// scheduler-backed animation track at a time.
pub struct AnimatedCell {
    handle: SchedulerHandle,
    track: Option<TrackId>,
    /// Authoritative value while no track is live
    current: f32,
    /// Resting value of the most recent write or animation
    target: f32,
}

impl AnimatedCell {
    pub fn new(handle: SchedulerHandle, initial: f32) -> Self {
        Self {
            handle,
            track: None,
            current: initial,
            target: initial,
        }
    }

    /// Current value, mid-animation values included
    pub fn get(&self) -> f32 {
        match self.track {
            Some(track) => self.handle.track_value(track).unwrap_or(self.target),
            None => self.current,
        }
    }

    /// The value the cell is resting at or animating toward
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Write directly, cancelling any in-flight animation.
    ///
    /// This is the primitive used by scroll-delta consumption: a drag always
    /// wins over an animation targeting the same value.
    pub fn set_immediate(&mut self, value: f32) {
        if let Some(track) = self.track.take() {
            self.handle.remove_track(track);
        }
        self.current = value;
        self.target = value;
    }

    /// Animate toward `target`, replacing any in-flight animation.
    ///
    /// An interrupted spring hands its velocity to the replacement so the
    /// value keeps moving naturally. Returns `None` when the cell is already
    /// resting at the target (nothing to animate) or the scheduler is gone
    /// (the value snaps to the target instead).
    pub fn animate_to(&mut self, target: f32, spec: AnimationSpec) -> Option<TrackId> {
        let from = self.get();
        let velocity = match self.track.take() {
            Some(TrackId::Spring(id)) => {
                let v = self.handle.spring_velocity(id).unwrap_or(0.0);
                self.handle.remove_spring(id);
                v
            }
            Some(track) => {
                self.handle.remove_track(track);
                0.0
            }
            None => 0.0,
        };

        self.current = from;
        self.target = target;

        if (target - from).abs() < 0.001 && velocity.abs() < f32::EPSILON {
            self.current = target;
            return None;
        }

        let track = match spec {
            AnimationSpec::Spring(config) => {
                let mut spring = Spring::with_velocity(config, from, velocity);
                spring.set_target(target);
                self.handle.register_spring(spring).map(TrackId::Spring)
            }
            AnimationSpec::Tween {
                duration_ms,
                easing,
            } => self
                .handle
                .register_tween(Tween::new(from, target, duration_ms, easing))
                .map(TrackId::Tween),
        };

        match track {
            Some(track) => {
                tracing::trace!(from, target, "cell animation started");
                self.track = Some(track);
                Some(track)
            }
            None => {
                // Scheduler gone: complete the transition instantly
                self.current = target;
                None
            }
        }
    }

    /// Cancel any in-flight animation, freezing the value where it is
    pub fn cancel(&mut self) {
        if let Some(track) = self.track.take() {
            let frozen = self.handle.track_value(track).unwrap_or(self.target);
            self.handle.remove_track(track);
            self.current = frozen;
            self.target = frozen;
        }
    }

    /// Check if an animation is currently driving this cell
    pub fn is_animating(&self) -> bool {
        match self.track {
            Some(track) => !self.handle.is_track_settled(track),
            None => false,
        }
    }
}

impl Drop for AnimatedCell {
    fn drop(&mut self) {
        if let Some(track) = self.track {
            self.handle.remove_track(track);
        }
    }
}

/// A joined set of animation tracks that finish and cancel together.
///
/// Finished only once **every** track has settled; `cancel` halts all tracks
/// as a unit so no sibling animation is left running when one is torn down.
#[derive(Clone)]
pub struct Transition {
    handle: SchedulerHandle,
    tracks: SmallVec<[TrackId; 2]>,
}

impl Transition {
    /// Join the given tracks; `None` entries were already at their target
    pub fn from_tracks(
        handle: SchedulerHandle,
        tracks: impl IntoIterator<Item = Option<TrackId>>,
    ) -> Self {
        Self {
            handle,
            tracks: tracks.into_iter().flatten().collect(),
        }
    }

    /// True once every joined track has settled (or was halted/removed)
    pub fn is_finished(&self) -> bool {
        self.tracks
            .iter()
            .all(|&track| self.handle.is_track_settled(track))
    }

    /// Halt every joined track in place.
    ///
    /// Values freeze mid-flight; owners polling the tracks observe them as
    /// settled at their current position.
    pub fn cancel(&self) {
        for &track in &self.tracks {
            self.handle.halt_track(track);
        }
        tracing::debug!(tracks = self.tracks.len(), "transition cancelled");
    }

    /// The scheduler tracks joined by this transition
    pub fn tracks(&self) -> &[TrackId] {
        &self.tracks
    }
}
