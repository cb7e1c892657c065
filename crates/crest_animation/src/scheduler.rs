//! Animation scheduler
//!
//! Owns every live animation and steps them on one cooperative frame clock.
//! Components never hold animations directly: they register a spring or tween
//! and keep a generational id, so a stale id after removal is harmless.
//!
//! The scheduler is advanced with an explicit delta (`advance`), which keeps
//! animation state fully deterministic for the host's frame loop and for
//! tests.

use std::sync::{Arc, Mutex, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::spring::Spring;
use crate::tween::Tween;

new_key_type! {
    /// Handle to a registered spring animation
    pub struct SpringId;
    /// Handle to a registered tween animation
    pub struct TweenId;
}

/// Id of either kind of registered animation.
///
/// Lets callers that only care about lifecycle (settled? cancel?) treat
/// springs and tweens uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackId {
    Spring(SpringId),
    Tween(TweenId),
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    springs: SlotMap<SpringId, Spring>,
    tweens: SlotMap<TweenId, Tween>,
}

/// The animation scheduler that ticks all active animations
///
/// Typically held by the application frame loop and shared with components
/// via [`SchedulerHandle`].
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                springs: SlotMap::with_key(),
                tweens: SlotMap::with_key(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Step all animations by an explicit frame delta (seconds).
    ///
    /// Returns true if any animations are still active (need another frame).
    pub fn advance(&self, dt: f32) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let dt_ms = dt * 1000.0;

        for (_, spring) in inner.springs.iter_mut() {
            spring.step(dt);
        }
        for (_, tween) in inner.tweens.iter_mut() {
            tween.tick(dt_ms);
        }

        // Animations are only removed when their owner drops or replaces
        // them, so a settled animation can be retargeted and restarted.
        inner.springs.iter().any(|(_, s)| !s.is_settled())
            || inner.tweens.iter().any(|(_, t)| t.is_playing())
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.springs.iter().any(|(_, s)| !s.is_settled())
            || inner.tweens.iter().any(|(_, t)| t.is_playing())
    }

    /// Get the number of registered springs
    pub fn spring_count(&self) -> usize {
        self.inner.lock().unwrap().springs.len()
    }

    /// Get the number of registered tweens
    pub fn tween_count(&self) -> usize {
        self.inner.lock().unwrap().tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to components that register animations. It won't keep the scheduler
/// alive; every operation is a no-op once the scheduler is dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    // =========================================================================
    // Spring operations
    // =========================================================================

    /// Register a spring and return its id
    pub fn register_spring(&self, spring: Spring) -> Option<SpringId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().springs.insert(spring))
    }

    /// Update a spring's target
    pub fn set_spring_target(&self, id: SpringId, target: f32) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(spring) = inner.lock().unwrap().springs.get_mut(id) {
                spring.set_target(target);
            }
        }
    }

    /// Get current spring value
    pub fn spring_value(&self, id: SpringId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().springs.get(id).map(|s| s.value()))
    }

    /// Get current spring velocity (for interruption handoff)
    pub fn spring_velocity(&self, id: SpringId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().springs.get(id).map(|s| s.velocity()))
    }

    /// Check if a spring has settled at its target.
    ///
    /// A missing spring counts as settled: there is nothing left animating.
    pub fn is_spring_settled(&self, id: SpringId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().springs.get(id).map(|s| s.is_settled()))
            .unwrap_or(true)
    }

    /// Remove a spring
    pub fn remove_spring(&self, id: SpringId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().springs.remove(id);
        }
    }

    // =========================================================================
    // Tween operations
    // =========================================================================

    /// Register a tween and return its id
    pub fn register_tween(&self, tween: Tween) -> Option<TweenId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().tweens.insert(tween))
    }

    /// Get current tween value
    pub fn tween_value(&self, id: TweenId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().tweens.get(id).map(|t| t.value()))
    }

    /// Check if a tween has stopped (finished or halted).
    ///
    /// A missing tween counts as stopped.
    pub fn is_tween_stopped(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().tweens.get(id).map(|t| !t.is_playing()))
            .unwrap_or(true)
    }

    /// Remove a tween
    pub fn remove_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().tweens.remove(id);
        }
    }

    // =========================================================================
    // Track operations (spring-or-tween)
    // =========================================================================

    /// Current value of a track, if it still exists
    pub fn track_value(&self, track: TrackId) -> Option<f32> {
        match track {
            TrackId::Spring(id) => self.spring_value(id),
            TrackId::Tween(id) => self.tween_value(id),
        }
    }

    /// Whether a track has reached (or been halted at) its resting state.
    ///
    /// Missing tracks count as settled.
    pub fn is_track_settled(&self, track: TrackId) -> bool {
        match track {
            TrackId::Spring(id) => self.is_spring_settled(id),
            TrackId::Tween(id) => self.is_tween_stopped(id),
        }
    }

    /// Halt a track in place without removing it.
    ///
    /// The track's current value stays readable, so an owner polling the track
    /// sees it frozen mid-flight rather than jumping to the target.
    pub fn halt_track(&self, track: TrackId) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let mut inner = inner.lock().unwrap();
        match track {
            TrackId::Spring(id) => {
                if let Some(spring) = inner.springs.get_mut(id) {
                    spring.halt();
                }
            }
            TrackId::Tween(id) => {
                if let Some(tween) = inner.tweens.get_mut(id) {
                    tween.stop();
                }
            }
        }
    }

    /// Remove a track entirely
    pub fn remove_track(&self, track: TrackId) {
        match track {
            TrackId::Spring(id) => self.remove_spring(id),
            TrackId::Tween(id) => self.remove_tween(id),
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
