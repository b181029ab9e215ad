//! Tunables for the map, loaded from an optional JSON file.
//!
//! Every section carries `#[serde(default)]`, so a config file only needs the
//! keys it wants to override.

use serde::Deserialize;

/// Where the catalog lives unless the config says otherwise.
pub const DEFAULT_DATA_URL: &str = "data/music_2025.json";
/// Optional config file fetched at startup.
pub const CONFIG_URL: &str = "data/config.json";

/// How a bubble becomes the track shown in the detail panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionTrigger {
	/// Press on a bubble (touch friendly).
	#[default]
	Click,
	/// Hovering a bubble also selects it (desktop).
	Hover,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
	pub data_url: String,
	pub selection: SelectionTrigger,
	pub layout: LayoutConfig,
	pub camera: CameraConfig,
	pub simulation: SimulationConfig,
}

impl Default for MapConfig {
	fn default() -> Self {
		Self {
			data_url: DEFAULT_DATA_URL.into(),
			selection: SelectionTrigger::default(),
			layout: LayoutConfig::default(),
			camera: CameraConfig::default(),
			simulation: SimulationConfig::default(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	pub min_radius: f64,
	pub max_radius: f64,
	/// Play count mapped to `max_radius`; the catalog maximum when unset.
	pub max_plays: Option<u32>,
	/// Exponent of the play-count curve. Below 1 it exaggerates small counts.
	pub radius_exponent: f64,
	pub golden_angle: f64,
	/// Fraction of the smaller viewport side used as the spiral unit.
	pub scale_factor: f64,
	pub spacing: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			min_radius: 5.0,
			max_radius: 50.0,
			max_plays: None,
			radius_exponent: 0.6,
			golden_angle: 2.399963,
			scale_factor: 0.008,
			spacing: 5.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
	pub zoom_min: f64,
	pub zoom_max: f64,
	pub zoom_in_step: f64,
	pub zoom_out_step: f64,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			zoom_min: 0.4,
			zoom_max: 4.0,
			zoom_in_step: 1.09,
			zoom_out_step: 0.92,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Repulsion reach as a multiple of the hovered bubble's radius.
	pub repulsion_multiplier: f64,
	pub repulsion_strength: f64,
	pub repulsion_damping: f64,
	pub return_strength: f64,
	pub return_damping: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			repulsion_multiplier: 8.0,
			repulsion_strength: 0.8,
			repulsion_damping: 0.85,
			return_strength: 0.15,
			return_damping: 0.8,
		}
	}
}

impl MapConfig {
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Fetch the config file, falling back to defaults when it is missing or
	/// malformed.
	pub async fn load(url: &str) -> Self {
		match crate::components::bubble_map::fetch_text(url).await {
			Ok(text) => match Self::from_json(&text) {
				Ok(config) => {
					log::info!("Loaded config from {url}");
					config
				}
				Err(e) => {
					log::warn!("Ignoring malformed config {url}: {e}");
					Self::default()
				}
			},
			Err(e) => {
				log::debug!("No config loaded ({e}), using defaults");
				Self::default()
			}
		}
	}
}
