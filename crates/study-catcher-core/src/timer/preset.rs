//! Timer presets.
//!
//! Three built-in presets ship with the app. Only the custom preset is
//! mutable; the two fixed ones never change.

use serde::{Deserialize, Serialize};

/// Id of the single mutable preset.
pub const CUSTOM_PRESET_ID: &str = "preset-custom";

/// Named study configuration: target duration plus break-interval count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerPreset {
    pub id: String,
    pub name: String,
    /// Target duration in minutes. Always positive.
    pub duration_min: u32,
    /// Number of breaks within the run.
    pub intervals: u32,
}

/// The catalog of selectable presets, in display order.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<TimerPreset>,
}

impl PresetCatalog {
    pub fn built_in() -> Self {
        Self {
            presets: vec![
                TimerPreset {
                    id: "preset-1".into(),
                    name: "30 minutes with 1 interval".into(),
                    duration_min: 30,
                    intervals: 1,
                },
                TimerPreset {
                    id: "preset-2".into(),
                    name: "60 minutes with 2 intervals".into(),
                    duration_min: 60,
                    intervals: 2,
                },
                TimerPreset {
                    id: CUSTOM_PRESET_ID.into(),
                    name: "Custom".into(),
                    duration_min: 45,
                    intervals: 1,
                },
            ],
        }
    }

    pub fn all(&self) -> &[TimerPreset] {
        &self.presets
    }

    pub fn get(&self, id: &str) -> Option<&TimerPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Update the custom preset. Declines a zero duration and leaves the
    /// fixed presets untouched. Returns the updated preset.
    pub fn update_custom(&mut self, duration_min: u32, intervals: u32) -> Option<&TimerPreset> {
        if duration_min == 0 {
            return None;
        }
        let custom = self.presets.iter_mut().find(|p| p.id == CUSTOM_PRESET_ID)?;
        custom.duration_min = duration_min;
        custom.intervals = intervals;
        Some(custom)
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_catalog_has_three_presets() {
        let catalog = PresetCatalog::built_in();
        assert_eq!(catalog.all().len(), 3);
        assert!(catalog.get("preset-1").is_some());
        assert!(catalog.get("preset-2").is_some());
        assert!(catalog.get(CUSTOM_PRESET_ID).is_some());
        assert!(catalog.get("preset-3").is_none());
    }

    #[test]
    fn update_custom_only_touches_custom() {
        let mut catalog = PresetCatalog::built_in();
        let updated = catalog.update_custom(90, 3).unwrap();
        assert_eq!(updated.duration_min, 90);
        assert_eq!(updated.intervals, 3);
        assert_eq!(catalog.get("preset-1").unwrap().duration_min, 30);
    }

    #[test]
    fn update_custom_rejects_zero_duration() {
        let mut catalog = PresetCatalog::built_in();
        assert!(catalog.update_custom(0, 1).is_none());
        assert_eq!(catalog.get(CUSTOM_PRESET_ID).unwrap().duration_min, 45);
    }
}
