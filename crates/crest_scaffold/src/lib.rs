//! Crest Scaffold
//!
//! A collapsing-toolbar scaffold: coordinates a shrinking/growing header with
//! a scrollable body. On every scroll delta it decides how much collapses or
//! reveals the toolbar and how much passes through to the body, and it
//! computes the toolbar's height and the scaffold's offset from an internal
//! progress model.
//!
//! Layout, rendering, and gesture recognition stay in the host framework;
//! this crate owns only the state machine between them.
//!
//! # Example
//!
//! ```rust,ignore
//! use crest_animation::AnimationScheduler;
//! use crest_scaffold::prelude::*;
//!
//! let scheduler = AnimationScheduler::new();
//! let config = ScaffoldConfig::new(ScrollStrategy::ExitUntilCollapsed)
//!     .with_snap(SnapConfig::default());
//! let mut coordinator = ScrollCoordinator::new(&scheduler.handle(), config);
//! coordinator.scaffold_mut().toolbar_mut().set_bounds(56.0, 224.0)?;
//!
//! // Host gesture loop:
//! coordinator.dispatch_scroll(delta_y, &mut body);
//! let outcome = coordinator.finish_gesture(release_velocity, &mut body);
//! // ...then advance `scheduler` each frame until animations settle.
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fling;
pub mod gesture;
pub mod scaffold;
pub mod snap;
pub mod snapshot;
pub mod strategy;
pub mod toolbar;

pub use config::ScaffoldConfig;
pub use coordinator::{BodyScroll, FlingOutcome, ScrollCoordinator, ScrollReport};
pub use error::{Result, ScaffoldError};
pub use fling::{DecayFling, FlingBehavior};
pub use gesture::{gesture_events, GestureState, SnapState, StateTransitions};
pub use scaffold::ScaffoldState;
pub use snap::{SnapConfig, SnapController};
pub use snapshot::ScaffoldSnapshot;
pub use strategy::ScrollStrategy;
pub use toolbar::ToolbarState;

/// Common imports for scaffold users
pub mod prelude {
    pub use crate::config::ScaffoldConfig;
    pub use crate::coordinator::{BodyScroll, ScrollCoordinator};
    pub use crate::fling::{DecayFling, FlingBehavior};
    pub use crate::scaffold::ScaffoldState;
    pub use crate::snap::SnapConfig;
    pub use crate::snapshot::ScaffoldSnapshot;
    pub use crate::strategy::ScrollStrategy;
    pub use crate::toolbar::ToolbarState;
    pub use crest_animation::{AnimationScheduler, AnimationSpec};
}
