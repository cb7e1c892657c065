//! Scaffold configuration surface

use crest_animation::AnimationSpec;

use crate::snap::SnapConfig;
use crate::strategy::ScrollStrategy;

/// Configuration for a collapsing-toolbar scaffold
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaffoldConfig {
    /// How scroll deltas split between toolbar and body (required)
    pub strategy: ScrollStrategy,
    /// Snap behavior; `None` installs no snapping at all
    pub snap: Option<SnapConfig>,
    /// Master switch for nested-scroll coordination. When false every delta
    /// and fling passes straight to the body.
    pub enabled: bool,
    /// Auto-expand the toolbar whenever the body's content does not fill its
    /// viewport (a half-collapsed header over a short list looks broken)
    pub expand_when_body_unfilled: bool,
    /// Timing for programmatic and snap transitions. The default is the
    /// spring sentinel; a fixed frame duration selects a tween.
    pub animation: AnimationSpec,
}

impl ScaffoldConfig {
    pub fn new(strategy: ScrollStrategy) -> Self {
        Self {
            strategy,
            snap: None,
            enabled: true,
            expand_when_body_unfilled: true,
            animation: AnimationSpec::default(),
        }
    }

    pub fn with_snap(mut self, snap: SnapConfig) -> Self {
        self.snap = Some(snap);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn expand_when_body_unfilled(mut self, expand: bool) -> Self {
        self.expand_when_body_unfilled = expand;
        self
    }

    /// Fixed animation duration in milliseconds; `None` keeps the spring
    /// default
    pub fn animation_duration(mut self, duration_ms: Option<u32>) -> Self {
        self.animation = AnimationSpec::from_duration(duration_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crest_animation::Easing;

    #[test]
    fn test_defaults() {
        let config = ScaffoldConfig::new(ScrollStrategy::EnterAlways);
        assert!(config.enabled);
        assert!(config.expand_when_body_unfilled);
        assert!(config.snap.is_none());
        assert_eq!(config.animation, AnimationSpec::default());
    }

    #[test]
    fn test_duration_sentinel_selects_spring_or_tween() {
        let spring = ScaffoldConfig::new(ScrollStrategy::EnterAlways).animation_duration(None);
        assert!(matches!(spring.animation, AnimationSpec::Spring(_)));

        let tween = ScaffoldConfig::new(ScrollStrategy::EnterAlways).animation_duration(Some(250));
        assert_eq!(
            tween.animation,
            AnimationSpec::Tween {
                duration_ms: 250,
                easing: Easing::EaseInOut
            }
        );
    }
}
