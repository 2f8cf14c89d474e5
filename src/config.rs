use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;

/// What the smoother does with its state when a detection cycle reports
/// no face. The source behavior kept the last pose forever; products that
/// prefer the overlay to disappear can switch to `Clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Keep the last smoothed pose; the overlay freezes in place and
    /// snapshots keep working through detection gaps.
    Freeze,
    /// Drop the pose; the compositor skips drawing until the face is
    /// re-acquired.
    Clear,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub ui: UiConfig,
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub mirror_mode: bool,
    /// Weight of the newest sample in the landmark EMA.
    pub smoothing_alpha: f32,
    pub gap_policy: GapPolicy,
    /// When set, picking an earring clears the necklace slot and vice
    /// versa. Off by default: both may coexist.
    pub exclusive_slots: bool,
    /// Default accessory scales, as fractions of the image's natural size.
    pub earring_scale: f32,
    pub necklace_scale: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_hud: bool,
    pub hud_scale: usize,
    pub hud_color_hex: String, // e.g. "#FFD700"
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            mirror_mode: true,
            smoothing_alpha: 0.2,
            gap_policy: GapPolicy::Freeze,
            exclusive_slots: false,
            earring_scale: 0.07,
            necklace_scale: 0.18,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_hud: true,
            hud_scale: 2,
            hud_color_hex: "#FFD700".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            ui: UiConfig::default(),
            catalog: Catalog::default(),
        }
    }
}

impl AppConfig {
    const PATH: &'static str = "config.json";

    pub fn load() -> Result<Self> {
        let config = if Path::new(Self::PATH).exists() {
            let content = fs::read_to_string(Self::PATH)?;
            // #[serde(default)] fills in fields missing from older files
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(c) => {
                    log::info!("loaded configuration from {}", Self::PATH);
                    c
                }
                Err(e) => {
                    log::warn!("error parsing config: {}; using defaults", e);
                    Self::default()
                }
            }
        } else {
            log::info!("no configuration file, creating default {}", Self::PATH);
            Self::default()
        };

        // Save back so new fields are populated in the file
        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::PATH, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_values() {
        let d = Defaults::default();
        assert_eq!(d.smoothing_alpha, 0.2);
        assert_eq!(d.gap_policy, GapPolicy::Freeze);
        assert_eq!(d.earring_scale, 0.07);
        assert_eq!(d.necklace_scale, 0.18);
        assert!(!d.exclusive_slots);
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.defaults.smoothing_alpha, 0.2);
        assert_eq!(config.catalog.range("gold_necklaces").end, 19);
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = AppConfig::default();
        config.defaults.gap_policy = GapPolicy::Clear;
        config.defaults.exclusive_slots = true;
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.defaults.gap_policy, GapPolicy::Clear);
        assert!(back.defaults.exclusive_slots);
    }
}
