//! Error types for gesture configuration.
//!
//! Touch processing itself is infallible: malformed or out-of-order events
//! collapse the recognizer to idle instead of surfacing an error. The only
//! fallible surface is building or reloading a configuration snapshot.

use thiserror::Error;

use crate::geometry::Rect;

/// Errors produced while building or applying a [`crate::GestureConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Display density is zero, negative, or not finite
    #[error("invalid display density: {0}")]
    InvalidDensity(f32),

    /// Surface has no area
    #[error("empty screen: {width}x{height} px")]
    EmptyScreen {
        /// Surface width in pixels
        width: u32,
        /// Surface height in pixels
        height: u32,
    },

    /// A duration that gates completion is zero
    #[error("{name} must be non-zero")]
    ZeroDuration {
        /// Name of the offending setting
        name: &'static str,
    },

    /// A distance threshold is negative or not finite
    #[error("invalid {name}: {value}")]
    InvalidThreshold {
        /// Name of the offending setting
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Header-hold variant selected but the header region covers no area
    #[error("header region is empty: {0:?}")]
    EmptyHeaderRegion(Rect),

    /// Configuration reload attempted while a gesture is being tracked
    #[error("cannot reload configuration while a gesture is in progress")]
    GestureInProgress,
}

impl ConfigError {
    /// Returns true if the host can recover without new display metrics.
    ///
    /// Bad thresholds come from persisted settings and can be replaced with
    /// defaults; a rejected reload can simply be retried once idle. Metric
    /// and layout errors describe the surface itself and persist until the
    /// host supplies different values.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ZeroDuration { .. } | Self::InvalidThreshold { .. } | Self::GestureInProgress
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_errors_are_recoverable() {
        assert!(ConfigError::ZeroDuration { name: "hold duration" }.is_recoverable());
        assert!(
            ConfigError::InvalidThreshold { name: "drift tolerance", value: -1.0 }.is_recoverable()
        );
        assert!(ConfigError::GestureInProgress.is_recoverable());
    }

    #[test]
    fn surface_errors_are_fatal() {
        assert!(!ConfigError::InvalidDensity(0.0).is_recoverable());
        assert!(!ConfigError::EmptyScreen { width: 0, height: 1920 }.is_recoverable());
        assert!(!ConfigError::EmptyHeaderRegion(Rect::default()).is_recoverable());
    }

    #[test]
    fn messages_name_the_setting() {
        let err = ConfigError::InvalidThreshold { name: "corner size", value: f32::NAN };
        assert_eq!(err.to_string(), "invalid corner size: NaN");

        let err = ConfigError::EmptyScreen { width: 0, height: 0 };
        assert_eq!(err.to_string(), "empty screen: 0x0 px");
    }
}
