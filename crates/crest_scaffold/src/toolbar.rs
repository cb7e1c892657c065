//! Collapsing toolbar height state
//!
//! [`ToolbarState`] tracks the toolbar's current height between the measured
//! `min_height` and `max_height`, exposes the normalized collapse progress,
//! and supports animated transitions to fully expanded/collapsed.
//!
//! The measurement pass is an external collaborator: it supplies the bounds
//! via [`ToolbarState::set_bounds`] once the toolbar content is measured.
//! This state never performs layout itself.

use crest_animation::{AnimatedCell, AnimationSpec, SchedulerHandle, TrackId};

use crate::error::{Result, ScaffoldError};

/// Reads as "fully expanded" as soon as bounds arrive: the height accessor
/// clamps into the measured range, so an unmeasured toolbar starts at max.
const UNMEASURED_EXPANDED: f32 = f32::MAX;

/// Height state of a collapsing toolbar
pub struct ToolbarState {
    min_height: f32,
    max_height: f32,
    cell: AnimatedCell,
}

impl ToolbarState {
    /// Create an unmeasured toolbar (bounds arrive from the measurement pass)
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            min_height: 0.0,
            max_height: 0.0,
            cell: AnimatedCell::new(handle, UNMEASURED_EXPANDED),
        }
    }

    /// Set the measured height bounds.
    ///
    /// The current height is re-read clamped into the new range; it is never
    /// silently rewritten. Inverted or negative bounds are a measurement bug
    /// and are reported, not repaired.
    pub fn set_bounds(&mut self, min_height: f32, max_height: f32) -> Result<()> {
        if min_height < 0.0 || min_height > max_height {
            return Err(ScaffoldError::InvalidBounds {
                min_height,
                max_height,
            });
        }
        self.min_height = min_height;
        self.max_height = max_height;
        Ok(())
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Current height, clamped into the measured bounds
    pub fn height(&self) -> f32 {
        self.cell.get().clamp(self.min_height, self.max_height)
    }

    /// Normalized collapse progress in [0, 1].
    ///
    /// 0 when fully collapsed, 1 when fully expanded; 0 when the toolbar has
    /// no collapsible range (`min_height == max_height`).
    pub fn progress(&self) -> f32 {
        let range = self.max_height - self.min_height;
        if range <= 0.0 {
            return 0.0;
        }
        ((self.height() - self.min_height) / range).clamp(0.0, 1.0)
    }

    /// Consume a raw height delta, the primitive behind scroll consumption.
    ///
    /// Clamps into the measured range, cancels any in-flight height
    /// animation, and returns the signed portion actually consumed.
    pub fn dispatch_delta(&mut self, raw: f32) -> f32 {
        let height = self.height();
        let next = (height + raw).clamp(self.min_height, self.max_height);
        self.cell.set_immediate(next);
        let consumed = next - height;
        tracing::trace!(raw, consumed, height = next, "toolbar delta");
        consumed
    }

    /// Animate height to `max_height`.
    ///
    /// Replaces any in-flight height animation. Returns `None` when already
    /// fully expanded.
    pub fn expand(&mut self, spec: AnimationSpec) -> Option<TrackId> {
        self.normalize();
        tracing::debug!(target = self.max_height, "toolbar expand");
        self.cell.animate_to(self.max_height, spec)
    }

    /// Animate height to `min_height`, replacing any in-flight animation
    pub fn collapse(&mut self, spec: AnimationSpec) -> Option<TrackId> {
        self.normalize();
        tracing::debug!(target = self.min_height, "toolbar collapse");
        self.cell.animate_to(self.min_height, spec)
    }

    /// Check if a height animation is in flight
    pub fn is_animating(&self) -> bool {
        self.cell.is_animating()
    }

    /// Write a height directly (snapshot restore); reads clamp into bounds
    pub(crate) fn write_height(&mut self, height: f32) {
        self.cell.set_immediate(height);
    }

    /// Fold any out-of-range stored value back into bounds before animating
    fn normalize(&mut self) {
        let clamped = self.height();
        if (self.cell.get() - clamped).abs() > f32::EPSILON {
            self.cell.set_immediate(clamped);
        }
    }
}
