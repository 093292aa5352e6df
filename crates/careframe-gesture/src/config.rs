//! Gesture configuration.
//!
//! Two layers:
//!
//! - [`GestureSettings`]: what the host persists. Density-independent units
//!   (dp) and the variant as its stored integer, so the host's key-value
//!   store never depends on this crate's enum layout.
//! - [`GestureConfig`]: an immutable pixel-space snapshot the recognizer reads.
//!   Built from settings and [`DisplayMetrics`] and validated once.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Time both pointers (or the edge-held pointer) must stay valid.
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_millis(2500);

/// Maximum gap between the first and second pointer's down events.
pub const DEFAULT_POINTER_PAIR_TIMEOUT: Duration = Duration::from_millis(150);

/// Maximum gap between consecutive tap downs, and maximum tap press length.
pub const DEFAULT_TAP_TIMEOUT: Duration = Duration::from_millis(600);

/// Press time before a single pointer may start an edge drag.
pub const DEFAULT_LONG_PRESS_DURATION: Duration = Duration::from_millis(500);

/// Interval between hold feedback pulses.
pub const DEFAULT_HAPTIC_INTERVAL: Duration = Duration::from_millis(500);

/// Side of the corner hit-regions.
pub const DEFAULT_CORNER_DP: f32 = 72.0;

/// Allowed displacement from the anchor while holding.
pub const DEFAULT_DRIFT_DP: f32 = 24.0;

/// Width of the band along each screen edge.
pub const DEFAULT_EDGE_DP: f32 = 24.0;

/// Opposite-corner pointers must be at least this fraction of the diagonal
/// apart.
pub const MIN_PAIR_DISTANCE_RATIO: f32 = 0.85;

/// Exit gesture variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureVariant {
    /// Two pointers in opposite corners, held.
    OppositeCornersHold,
    /// Two pointers inside the header region, held.
    TwoFingerHeaderHold,
    /// One pointer long-pressed, dragged to an edge, held.
    #[default]
    SingleFingerEdgeDragHold,
    /// Three quick taps in one spot.
    TripleTapDebug,
}

impl GestureVariant {
    /// Every variant in stored-value order.
    pub const ALL: [Self; 4] = [
        Self::OppositeCornersHold,
        Self::TwoFingerHeaderHold,
        Self::SingleFingerEdgeDragHold,
        Self::TripleTapDebug,
    ];

    /// Integer stored in the host's settings.
    pub fn value(self) -> i32 {
        match self {
            Self::OppositeCornersHold => 0,
            Self::TwoFingerHeaderHold => 1,
            Self::SingleFingerEdgeDragHold => 2,
            Self::TripleTapDebug => 3,
        }
    }

    /// Decode a stored integer. Unknown values map to the default variant.
    pub fn from_value(value: i32) -> Self {
        Self::ALL.into_iter().find(|v| v.value() == value).unwrap_or_default()
    }

    /// Label for the host's settings screen.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OppositeCornersHold => "Opposite corners hold (strict)",
            Self::TwoFingerHeaderHold => "Two-finger header hold",
            Self::SingleFingerEdgeDragHold => "Single-finger edge drag hold (easier)",
            Self::TripleTapDebug => "Triple tap (debug)",
        }
    }

    /// True for variants that pair two concurrent pointers.
    pub fn is_two_finger(self) -> bool {
        matches!(self, Self::OppositeCornersHold | Self::TwoFingerHeaderHold)
    }
}

/// Host-persisted exit gesture settings.
///
/// Missing fields decode to their defaults so settings written by older
/// builds keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Stored [`GestureVariant`] value.
    pub exit_gesture_type: i32,
    /// Hold duration in milliseconds.
    pub exit_gesture_hold_ms: u32,
    /// Corner hit-region side in dp.
    pub exit_gesture_corner_dp: f32,
    /// Drift tolerance in dp.
    pub exit_gesture_drift_dp: f32,
    /// Pairing timeout in milliseconds.
    pub exit_gesture_pointer_timeout_ms: u32,
    /// Inter-tap timeout in milliseconds.
    pub exit_gesture_tap_timeout_ms: u32,
    /// Host should ask for the PIN after the gesture fires.
    pub exit_gesture_require_pin: bool,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            exit_gesture_type: GestureVariant::default().value(),
            exit_gesture_hold_ms: millis(DEFAULT_HOLD_DURATION) as u32,
            exit_gesture_corner_dp: DEFAULT_CORNER_DP,
            exit_gesture_drift_dp: DEFAULT_DRIFT_DP,
            exit_gesture_pointer_timeout_ms: millis(DEFAULT_POINTER_PAIR_TIMEOUT) as u32,
            exit_gesture_tap_timeout_ms: millis(DEFAULT_TAP_TIMEOUT) as u32,
            exit_gesture_require_pin: false,
        }
    }
}

impl GestureSettings {
    /// Decoded variant.
    pub fn variant(&self) -> GestureVariant {
        GestureVariant::from_value(self.exit_gesture_type)
    }
}

/// Display properties needed to convert dp to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Pixels per dp.
    pub density: f32,
    /// Surface width in pixels.
    pub width_px: u32,
    /// Surface height in pixels.
    pub height_px: u32,
}

impl DisplayMetrics {
    /// Create display metrics.
    pub const fn new(density: f32, width_px: u32, height_px: u32) -> Self {
        Self { density, width_px, height_px }
    }

    /// Convert dp to pixels.
    pub fn px(&self, dp: f32) -> f32 {
        dp * self.density
    }
}

/// Immutable pixel-space configuration snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Selected variant.
    pub variant: GestureVariant,
    /// Hold time required to complete.
    pub hold_duration: Duration,
    /// Pairing window for the second pointer.
    pub pointer_pair_timeout: Duration,
    /// Inter-tap window and maximum press length of one tap.
    pub tap_timeout: Duration,
    /// Press time before an edge drag may start.
    pub long_press_duration: Duration,
    /// Interval between hold feedback pulses.
    pub haptic_interval: Duration,
    /// Side of the corner hit-regions.
    pub corner_size_px: f32,
    /// Allowed displacement from the anchor while holding.
    pub drift_tolerance_px: f32,
    /// Width of the band along each edge.
    pub edge_tolerance_px: f32,
    /// Opposite-corner separation as a fraction of the diagonal.
    pub min_pair_distance_ratio: f32,
    /// Surface width.
    pub screen_width_px: u32,
    /// Surface height.
    pub screen_height_px: u32,
    /// Passed through to the host; unused by recognition.
    pub require_pin: bool,
}

impl GestureConfig {
    /// Default thresholds at density 1.0 for a surface of the given size.
    pub fn for_screen(variant: GestureVariant, width_px: u32, height_px: u32) -> Self {
        Self {
            variant,
            hold_duration: DEFAULT_HOLD_DURATION,
            pointer_pair_timeout: DEFAULT_POINTER_PAIR_TIMEOUT,
            tap_timeout: DEFAULT_TAP_TIMEOUT,
            long_press_duration: DEFAULT_LONG_PRESS_DURATION,
            haptic_interval: DEFAULT_HAPTIC_INTERVAL,
            corner_size_px: DEFAULT_CORNER_DP,
            drift_tolerance_px: DEFAULT_DRIFT_DP,
            edge_tolerance_px: DEFAULT_EDGE_DP,
            min_pair_distance_ratio: MIN_PAIR_DISTANCE_RATIO,
            screen_width_px: width_px,
            screen_height_px: height_px,
            require_pin: false,
        }
    }

    /// Build a snapshot from persisted settings and display metrics.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidDensity` if density is not a positive number
    /// - Any error from [`GestureConfig::validate`]
    pub fn from_settings(
        settings: &GestureSettings,
        metrics: &DisplayMetrics,
    ) -> Result<Self, ConfigError> {
        if !(metrics.density.is_finite() && metrics.density > 0.0) {
            return Err(ConfigError::InvalidDensity(metrics.density));
        }

        let config = Self {
            variant: settings.variant(),
            hold_duration: Duration::from_millis(u64::from(settings.exit_gesture_hold_ms)),
            pointer_pair_timeout: Duration::from_millis(u64::from(
                settings.exit_gesture_pointer_timeout_ms,
            )),
            tap_timeout: Duration::from_millis(u64::from(settings.exit_gesture_tap_timeout_ms)),
            long_press_duration: DEFAULT_LONG_PRESS_DURATION,
            haptic_interval: DEFAULT_HAPTIC_INTERVAL,
            corner_size_px: metrics.px(settings.exit_gesture_corner_dp),
            drift_tolerance_px: metrics.px(settings.exit_gesture_drift_dp),
            edge_tolerance_px: metrics.px(DEFAULT_EDGE_DP),
            min_pair_distance_ratio: MIN_PAIR_DISTANCE_RATIO,
            screen_width_px: metrics.width_px,
            screen_height_px: metrics.height_px,
            require_pin: settings.exit_gesture_require_pin,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the snapshot can drive recognition.
    ///
    /// # Errors
    ///
    /// - `ConfigError::EmptyScreen` if either dimension is zero
    /// - `ConfigError::ZeroDuration` if hold, pairing, tap, or long-press
    ///   duration is zero
    /// - `ConfigError::InvalidThreshold` if a distance is negative or not
    ///   finite, or the pair ratio is outside `0.0..=1.0`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width_px == 0 || self.screen_height_px == 0 {
            return Err(ConfigError::EmptyScreen {
                width: self.screen_width_px,
                height: self.screen_height_px,
            });
        }

        for (name, duration) in [
            ("hold duration", self.hold_duration),
            ("pointer pair timeout", self.pointer_pair_timeout),
            ("tap timeout", self.tap_timeout),
            ("long press duration", self.long_press_duration),
        ] {
            if duration.is_zero() {
                return Err(ConfigError::ZeroDuration { name });
            }
        }

        for (name, value) in [
            ("corner size", self.corner_size_px),
            ("drift tolerance", self.drift_tolerance_px),
            ("edge tolerance", self.edge_tolerance_px),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.min_pair_distance_ratio) {
            return Err(ConfigError::InvalidThreshold {
                name: "pair distance ratio",
                value: self.min_pair_distance_ratio,
            });
        }

        Ok(())
    }
}

/// Whole milliseconds in `duration`, saturating.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
