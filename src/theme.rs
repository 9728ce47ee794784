//! Day and night map styling

use serde::Serialize;

use crate::config::MapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapTheme {
    #[default]
    Day,
    Night,
}

impl MapTheme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            MapTheme::Night
        } else {
            MapTheme::Day
        }
    }

    /// Key that forces the map to remount when the theme flips
    pub fn key(&self) -> &'static str {
        match self {
            MapTheme::Day => "day",
            MapTheme::Night => "night",
        }
    }

    pub fn options(&self, config: &MapConfig) -> MapOptions {
        let map_id = match self {
            MapTheme::Day => config.day_map_id.clone(),
            MapTheme::Night => config.night_map_id.clone(),
        };
        MapOptions {
            map_id,
            disable_default_ui: true,
            clickable_icons: false,
            zoom: config.zoom,
        }
    }
}

/// Options handed to the map SDK
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub map_id: Option<String>,
    #[serde(rename = "disableDefaultUI")]
    pub disable_default_ui: bool,
    pub clickable_icons: bool,
    pub zoom: u8,
}

/// Stroke used to draw a route between a marker and the office.
/// Sits above the distance rings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineStyle {
    pub z_index: i32,
    pub stroke_color: String,
    pub stroke_weight: u32,
}

impl PolylineStyle {
    pub fn route() -> Self {
        Self {
            z_index: 50,
            stroke_color: "#1976D2".to_string(),
            stroke_weight: 5,
        }
    }
}
