//! Game settings
//!
//! Persisted separately from the best score: LocalStorage on the web, a JSON
//! file named by `HORSE_FLAPPY_SETTINGS` on native.

use serde::{Deserialize, Serialize};

use crate::consts::{BEST_SCORE_KEY, FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Field;
use crate::tuning::Tuning;

/// Environment variable naming a native settings file
pub const SETTINGS_ENV: &str = "HORSE_FLAPPY_SETTINGS";

/// Game settings. Missing fields in a stored document take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial play field size (px); the web build follows the canvas instead
    pub width: f32,
    pub height: f32,
    /// Fixed RNG seed for reproducible gap sequences
    pub seed: Option<u64>,

    // === Storage ===
    /// LocalStorage key for the best score
    pub best_score_key: String,
    /// Best score file (native)
    pub best_score_path: String,

    /// Simulated seconds the headless demo runs for
    pub demo_seconds: f32,

    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            seed: None,
            best_score_key: BEST_SCORE_KEY.to_string(),
            best_score_path: "horseflappy_best.json".to_string(),
            demo_seconds: 60.0,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse a settings document. Out-of-range tuning is repaired, not rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.sanitized();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Initial play field
    pub fn field(&self) -> Field {
        Field::new(self.width, self.height)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(crate::consts::SETTINGS_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `HORSE_FLAPPY_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.to_string_lossy());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings file {}: {}", path.to_string_lossy(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path.to_string_lossy(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_field() {
        let settings = Settings::default();
        assert_eq!(settings.field(), Field::new(800.0, 600.0));
        assert_eq!(settings.best_score_key, "horseflappy_best");
        assert_eq!(settings.seed, None);
        assert_eq!(settings.tuning, Tuning::default());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings = Settings::from_json(r#"{"seed": 9, "tuning": {"gravity": 900.0}}"#).unwrap();
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.width, 800.0);
        assert_eq!(settings.tuning.gravity, 900.0);
        assert_eq!(settings.tuning.gap_base, 170.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            width: 1024.0,
            seed: Some(3),
            demo_seconds: 5.0,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(Settings::from_json("{not json").is_err());
        assert!(Settings::from_json(r#"{"width": "wide"}"#).is_err());
    }

    #[test]
    fn test_inverted_gap_range_is_repaired() {
        let settings =
            Settings::from_json(r#"{"seed": 1, "tuning": {"gap_min": 200.0, "gap_max": 150.0}}"#)
                .unwrap();
        assert_eq!(settings.tuning.gap_min, 150.0);
        assert_eq!(settings.tuning.gap_max, 200.0);
    }

    #[test]
    fn test_negative_frame_ceiling_is_repaired() {
        let settings = Settings::from_json(r#"{"tuning": {"max_frame_dt": -0.01}}"#).unwrap();
        assert_eq!(settings.tuning.max_frame_dt, Tuning::default().max_frame_dt);
    }

    #[test]
    fn test_degenerate_field_is_clamped() {
        let settings = Settings {
            width: 0.0,
            height: -5.0,
            ..Settings::default()
        };
        let field = settings.field();
        assert!(field.width >= 1.0);
        assert!(field.height >= 1.0);
    }
}
