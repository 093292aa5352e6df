//! Simulated gesture environment.
//!
//! Serves a fixed [`GestureConfig`] directly, skipping the dp conversion of
//! persisted settings, so tests state thresholds in pixels.

use careframe_gesture::{
    ConfigError, GestureConfig, GestureEnvironment, GestureVariant, Rect, TouchExplorationFlag,
};

/// Environment for deterministic tests.
///
/// Clones share the touch-exploration flag, so a test can keep a handle and
/// toggle exploration while the recognizer owns the environment.
#[derive(Debug, Clone)]
pub struct SimEnv {
    config: GestureConfig,
    header: Rect,
    touch_exploration: TouchExplorationFlag,
}

impl SimEnv {
    /// Simulated surface width.
    pub const SCREEN_WIDTH: u32 = 1080;

    /// Simulated surface height.
    pub const SCREEN_HEIGHT: u32 = 1920;

    /// Default header region: a full-width toolbar along the top.
    pub const HEADER: Rect = Rect::new(0.0, 0.0, 1080.0, 160.0);

    /// Phone-sized surface with default thresholds at density 1.0.
    pub fn for_variant(variant: GestureVariant) -> Self {
        Self::with_config(GestureConfig::for_screen(
            variant,
            Self::SCREEN_WIDTH,
            Self::SCREEN_HEIGHT,
        ))
    }

    /// Environment serving `config` with the default header region.
    pub fn with_config(config: GestureConfig) -> Self {
        Self { config, header: Self::HEADER, touch_exploration: TouchExplorationFlag::default() }
    }

    /// Replace the header region.
    #[must_use]
    pub fn with_header_bounds(mut self, header: Rect) -> Self {
        self.header = header;
        self
    }

    /// Replace the served configuration. Takes effect on the next reload.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Mutable access to the served configuration.
    pub fn config_mut(&mut self) -> &mut GestureConfig {
        &mut self.config
    }

    /// Move the header region.
    pub fn set_header_bounds(&mut self, header: Rect) {
        self.header = header;
    }

    /// Handle to the touch-exploration flag.
    pub fn touch_exploration(&self) -> TouchExplorationFlag {
        self.touch_exploration.clone()
    }
}

impl GestureEnvironment for SimEnv {
    fn gesture_config(&self) -> Result<GestureConfig, ConfigError> {
        Ok(self.config.clone())
    }

    fn is_touch_exploration_active(&self) -> bool {
        self.touch_exploration.get()
    }

    fn header_bounds(&self) -> Rect {
        self.header
    }
}
