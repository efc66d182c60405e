use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::defaults;
use crate::grouping::DEFAULT_GROUP_SIZE;

fn config_paths(filename: &str) -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Some(user_config) = defaults::user_config_dir() {
		paths.push(user_config.join(filename));
	}

	paths.push(PathBuf::from("config").join(filename));

	paths
}

fn find_config(filename: &str) -> Option<PathBuf> {
	config_paths(filename).into_iter().find(|p| p.exists())
}

#[derive(Debug, Clone, Deserialize)]
pub struct RollConfig {
	#[serde(default = "default_tick_ms")]
	pub tick_ms: u64,
	#[serde(default = "default_duration_ms")]
	pub duration_ms: u64,
}

fn default_tick_ms() -> u64 { 50 }
fn default_duration_ms() -> u64 { 1500 }

impl Default for RollConfig {
	fn default() -> Self {
		Self {
			tick_ms: default_tick_ms(),
			duration_ms: default_duration_ms(),
		}
	}
}

impl RollConfig {
	pub fn tick(&self) -> Duration {
		Duration::from_millis(self.tick_ms.max(1))
	}

	pub fn duration(&self) -> Duration {
		Duration::from_millis(self.duration_ms)
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupingConfig {
	#[serde(default = "default_group_size")]
	pub default_size: usize,
}

fn default_group_size() -> usize { DEFAULT_GROUP_SIZE }

impl Default for GroupingConfig {
	fn default() -> Self {
		Self { default_size: default_group_size() }
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrawConfig {
	#[serde(default)]
	pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
	#[serde(default = "default_theme")]
	pub theme: String,
}

fn default_theme() -> String {
	"default".to_string()
}

impl Default for UiConfig {
	fn default() -> Self {
		Self { theme: default_theme() }
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
	#[serde(default)]
	pub roll: RollConfig,
	#[serde(default)]
	pub grouping: GroupingConfig,
	#[serde(default)]
	pub draw: DrawConfig,
	#[serde(default)]
	pub ui: UiConfig,
}

impl Settings {
	pub fn from_toml(content: &str) -> Result<Self, String> {
		let mut settings: Settings = toml::from_str(content)
			.map_err(|e| format!("Failed to parse settings: {}", e))?;
		settings.grouping.default_size = settings.grouping.default_size.max(1);
		Ok(settings)
	}
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, String> {
	let content = fs::read_to_string(&path)
		.map_err(|e| format!("Failed to read {}: {}", path.as_ref().display(), e))?;

	Settings::from_toml(&content)
}

/// Loads `settings.toml` from the usual places; a missing file means
/// defaults, a broken one is an error.
pub fn load_settings_auto() -> Result<Settings, String> {
	match find_config("settings.toml") {
		Some(path) => load_settings(&path),
		None => Ok(Settings::default()),
	}
}
