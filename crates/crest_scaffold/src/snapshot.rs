//! Scaffold persistence
//!
//! The minimal serializable snapshot surviving process or configuration
//! recreation: toolbar height, scaffold offset, and the strategy name. An
//! empty strategy string means "no strategy configured yet", which is valid,
//! not an error. Restoring may happen before the measurement pass runs; values are
//! stored raw and the usual read clamps apply once bounds arrive.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scaffold::ScaffoldState;
use crate::strategy::ScrollStrategy;

/// Minimal serializable scaffold state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldSnapshot {
    pub toolbar_height: i32,
    pub offset_y: i32,
    /// Strategy name, or empty when none is configured
    pub strategy: String,
}

impl ScaffoldState {
    /// Capture the minimal persistable state
    pub fn snapshot(&self) -> ScaffoldSnapshot {
        ScaffoldSnapshot {
            toolbar_height: self.toolbar().height().round() as i32,
            offset_y: self.offset_y().round() as i32,
            strategy: self
                .strategy()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    /// Reapply a snapshot.
    ///
    /// The strategy is restored first since it defines the offset range. An
    /// unrecognized non-empty strategy name is an error and leaves the state
    /// untouched.
    pub fn restore(&mut self, snapshot: &ScaffoldSnapshot) -> Result<()> {
        let strategy = if snapshot.strategy.is_empty() {
            None
        } else {
            Some(snapshot.strategy.parse::<ScrollStrategy>()?)
        };

        self.set_strategy(strategy);
        self.toolbar_mut().write_height(snapshot.toolbar_height as f32);
        self.write_offset(snapshot.offset_y as f32);
        tracing::debug!(?snapshot, "scaffold state restored");
        Ok(())
    }
}
