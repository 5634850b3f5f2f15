// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.
//
// Supplied by the host at window creation (usually not at all) and held in
// memory for the life of the process. Never written anywhere.

use serde::{Deserialize, Serialize};

use crate::error::{BloxError, Result};
use crate::types::{Amplitude, Argb, CutoutMode};

/// Runtime settings for the native bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Global name the bridge is exposed under in the web content
    /// (`window.AndroidNative.rumble(ms)`).
    pub interface_name: String,
    /// Intensity used on amplitude-controlled platforms.
    pub amplitude: Amplitude,
    /// Cutout layout applied when the platform supports it.
    pub cutout_mode: CutoutMode,
    /// Status bar color set at window creation.
    pub status_bar_color: Argb,
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            interface_name: "AndroidNative".into(),
            amplitude: Amplitude::Maximum,
            cutout_mode: CutoutMode::ShortEdges,
            status_bar_color: Argb::TRANSPARENT,
            log_filter: "info".into(),
        }
    }
}

impl BridgeConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: BridgeConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// The interface name becomes a property on `window`, so it has to be a
    /// plain JavaScript identifier.
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.interface_name.chars();
        let valid = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        };
        if !valid {
            return Err(BloxError::InvalidConfig(format!(
                "interface_name {:?} is not a JavaScript identifier",
                self.interface_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_app() {
        let config = BridgeConfig::default();
        assert_eq!(config.interface_name, "AndroidNative");
        assert_eq!(config.amplitude, Amplitude::Maximum);
        assert_eq!(config.cutout_mode, CutoutMode::ShortEdges);
        assert_eq!(config.status_bar_color, Argb::TRANSPARENT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config = BridgeConfig::from_json(r#"{"amplitude": "platform_default"}"#).unwrap();
        assert_eq!(config.amplitude, Amplitude::PlatformDefault);
        assert_eq!(config.interface_name, "AndroidNative");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(BridgeConfig::from_json("{}").unwrap(), BridgeConfig::default());
    }

    #[test]
    fn rejects_non_identifier_interface_name() {
        let err = BridgeConfig::from_json(r#"{"interface_name": "android-native"}"#).unwrap_err();
        assert!(matches!(err, BloxError::InvalidConfig(_)));

        let err = BridgeConfig::from_json(r#"{"interface_name": ""}"#).unwrap_err();
        assert!(matches!(err, BloxError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = BridgeConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, BloxError::Serialization(_)));
    }
}
