//! Environment abstraction for the recognizer.
//!
//! Decouples gesture logic from the host: where thresholds are persisted,
//! how the display is measured, and whether the platform screen reader is
//! currently interpreting touches. Production hosts use
//! [`SettingsEnvironment`]; tests substitute their own implementation.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    config::{DisplayMetrics, GestureConfig, GestureSettings},
    error::ConfigError,
    geometry::Rect,
};

/// Host collaborator supplying configuration and platform state.
///
/// # Invariants
///
/// - `gesture_config()` is only called at construction and on explicit
///   reload, never per event.
/// - `is_touch_exploration_active()` is called once per event and must be
///   cheap.
pub trait GestureEnvironment {
    /// Current configuration snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the stored settings or metrics are invalid.
    fn gesture_config(&self) -> Result<GestureConfig, ConfigError>;

    /// True while the platform's touch exploration mode owns touch input.
    fn is_touch_exploration_active(&self) -> bool;

    /// Header region for the two-finger header hold.
    ///
    /// Queried when a pairing is validated so a toolbar that moved since
    /// construction is honoured. Defaults to an empty region.
    fn header_bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Shared touch-exploration flag.
///
/// The host's accessibility-state listener may run on another thread than
/// input dispatch, so the flag is atomic. Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct TouchExplorationFlag(Arc<AtomicBool>);

impl TouchExplorationFlag {
    /// Create a flag with the given initial value.
    pub fn new(active: bool) -> Self {
        Self(Arc::new(AtomicBool::new(active)))
    }

    /// Update the flag.
    pub fn set(&self, active: bool) {
        self.0.store(active, Ordering::Relaxed);
    }

    /// Current value.
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Environment backed by persisted settings and measured display metrics.
#[derive(Debug, Clone)]
pub struct SettingsEnvironment {
    settings: GestureSettings,
    metrics: DisplayMetrics,
    header: Rect,
    touch_exploration: TouchExplorationFlag,
}

impl SettingsEnvironment {
    /// Create an environment with no header region and exploration inactive.
    pub fn new(settings: GestureSettings, metrics: DisplayMetrics) -> Self {
        Self {
            settings,
            metrics,
            header: Rect::default(),
            touch_exploration: TouchExplorationFlag::default(),
        }
    }

    /// Set the header region.
    #[must_use]
    pub fn with_header_bounds(mut self, header: Rect) -> Self {
        self.header = header;
        self
    }

    /// Share an existing touch-exploration flag.
    #[must_use]
    pub fn with_touch_exploration(mut self, flag: TouchExplorationFlag) -> Self {
        self.touch_exploration = flag;
        self
    }

    /// Handle to the touch-exploration flag.
    pub fn touch_exploration(&self) -> TouchExplorationFlag {
        self.touch_exploration.clone()
    }

    /// Replace the settings. Takes effect on the next reload.
    pub fn set_settings(&mut self, settings: GestureSettings) {
        self.settings = settings;
    }

    /// Replace the display metrics, e.g. after rotation. Takes effect on the
    /// next reload.
    pub fn set_metrics(&mut self, metrics: DisplayMetrics) {
        self.metrics = metrics;
    }

    /// Move the header region. Takes effect on the next pairing.
    pub fn set_header_bounds(&mut self, header: Rect) {
        self.header = header;
    }

    /// Stored settings.
    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }
}

impl GestureEnvironment for SettingsEnvironment {
    fn gesture_config(&self) -> Result<GestureConfig, ConfigError> {
        GestureConfig::from_settings(&self.settings, &self.metrics)
    }

    fn is_touch_exploration_active(&self) -> bool {
        self.touch_exploration.get()
    }

    fn header_bounds(&self) -> Rect {
        self.header
    }
}
