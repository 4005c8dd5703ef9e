//! Travel modes and per-mode settings.

use std::collections::HashMap;

use strum::IntoEnumIterator;

/// A travel profile with independent settings.
///
/// The lowercase `Display` form is the wire name the routing engine
/// expects (`auto`, `bus`, `bicycle`, `pedestrian`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Auto,
    Bus,
    Bicycle,
    Pedestrian,
}

impl TravelMode {
    /// Factory defaults for this mode, in km/h.
    pub fn default_settings(self) -> ModeSettings {
        let max_speed = match self {
            TravelMode::Auto => 130.0,
            TravelMode::Bus => 100.0,
            TravelMode::Bicycle => 25.0,
            TravelMode::Pedestrian => 4.0,
        };
        ModeSettings { max_speed }
    }
}

/// The editable settings record of a single travel mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeSettings {
    /// Maximum travel speed in km/h.
    pub max_speed: f64,
}

/// Field-merge patch for a settings record.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettingsPatch {
    pub max_speed: Option<f64>,
}

// Range the settings editor enforces on max speed.
const MAX_SPEED_RANGE: (f64, f64) = (1.0, 250.0);

/// Per-mode settings records, independently editable and persistent for
/// the lifetime of the session.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeSettingsMap {
    settings: HashMap<TravelMode, ModeSettings>,
}

impl ModeSettingsMap {
    /// A map pre-populated with each mode's factory defaults.
    pub fn new() -> Self {
        Self {
            settings: TravelMode::iter()
                .map(|mode| (mode, mode.default_settings()))
                .collect(),
        }
    }

    pub fn get(&self, mode: TravelMode) -> ModeSettings {
        self.settings
            .get(&mode)
            .copied()
            .unwrap_or_else(|| mode.default_settings())
    }

    /// Merge a patch into one mode's record. Other modes are untouched.
    pub fn update(&mut self, mode: TravelMode, patch: SettingsPatch) {
        let entry = self
            .settings
            .entry(mode)
            .or_insert_with(|| mode.default_settings());
        if let Some(max_speed) = patch.max_speed {
            entry.max_speed = max_speed.clamp(MAX_SPEED_RANGE.0, MAX_SPEED_RANGE.1);
        }
    }
}

impl Default for ModeSettingsMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(TravelMode::Auto.to_string(), "auto");
        assert_eq!(TravelMode::Bus.to_string(), "bus");
        assert_eq!(TravelMode::Bicycle.to_string(), "bicycle");
        assert_eq!(TravelMode::Pedestrian.to_string(), "pedestrian");
    }

    #[test]
    fn test_defaults() {
        let map = ModeSettingsMap::new();
        assert_eq!(map.get(TravelMode::Auto).max_speed, 130.0);
        assert_eq!(map.get(TravelMode::Bus).max_speed, 100.0);
        assert_eq!(map.get(TravelMode::Bicycle).max_speed, 25.0);
        assert_eq!(map.get(TravelMode::Pedestrian).max_speed, 4.0);
    }

    #[test]
    fn test_update_leaves_other_modes_alone() {
        let mut map = ModeSettingsMap::new();
        map.update(TravelMode::Bicycle, SettingsPatch { max_speed: Some(30.0) });

        assert_eq!(map.get(TravelMode::Bicycle).max_speed, 30.0);
        assert_eq!(map.get(TravelMode::Auto).max_speed, 130.0);
        assert_eq!(map.get(TravelMode::Pedestrian).max_speed, 4.0);
    }

    #[test]
    fn test_update_clamps_to_editor_range() {
        let mut map = ModeSettingsMap::new();
        map.update(TravelMode::Auto, SettingsPatch { max_speed: Some(400.0) });
        assert_eq!(map.get(TravelMode::Auto).max_speed, 250.0);

        map.update(TravelMode::Auto, SettingsPatch { max_speed: Some(0.0) });
        assert_eq!(map.get(TravelMode::Auto).max_speed, 1.0);
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let mut map = ModeSettingsMap::new();
        map.update(TravelMode::Bus, SettingsPatch::default());
        assert_eq!(map.get(TravelMode::Bus).max_speed, 100.0);
    }
}
