use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};

use crate::defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
	pub background_color: String,
	pub title_color: String,
	pub border_color: String,
	pub border_style: String,

	pub stage_border_color: String,
	pub rolling_color: String,
	pub winner_color: String,
	pub idle_color: String,

	pub history_latest_color: String,
	pub history_color: String,

	pub stat_value_color: String,
	pub stat_winner_color: String,

	pub duplicate_color: String,
	pub entry_color: String,

	pub group_border_color: String,
	pub group_title_color: String,

	pub status_color: String,
	pub status_alert_color: String,
	pub status_prompt_color: String,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background_color: "black".to_string(),
			title_color: "yellow".to_string(),
			border_color: "dark_gray".to_string(),
			border_style: "rounded".to_string(),

			stage_border_color: "blue".to_string(),
			rolling_color: "light_blue".to_string(),
			winner_color: "yellow".to_string(),
			idle_color: "dark_gray".to_string(),

			history_latest_color: "yellow".to_string(),
			history_color: "gray".to_string(),

			stat_value_color: "white".to_string(),
			stat_winner_color: "yellow".to_string(),

			duplicate_color: "light_red".to_string(),
			entry_color: "gray".to_string(),

			group_border_color: "green".to_string(),
			group_title_color: "light_green".to_string(),

			status_color: "gray".to_string(),
			status_alert_color: "light_red".to_string(),
			status_prompt_color: "cyan".to_string(),
		}
	}
}

impl Theme {
	/// User theme file first, then the bundled copy of the same name.
	pub fn load_named(name: &str) -> Result<Self, String> {
		let contents = match Self::user_path(name) {
			Some(path) => fs::read_to_string(&path)
				.map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
			None => defaults::embedded_theme(name)
				.ok_or_else(|| format!("Theme '{}' not found", name))?
				.to_string(),
		};

		toml::from_str(&contents).map_err(|e| format!("Failed to parse theme '{}': {}", name, e))
	}

	pub fn load(name: &str) -> Self {
		Self::load_named(name).unwrap_or_default()
	}

	pub fn list_available() -> Vec<String> {
		defaults::list_themes()
	}

	fn user_path(name: &str) -> Option<PathBuf> {
		let path = defaults::user_config_dir()?
			.join("themes")
			.join(format!("{}.toml", name));
		path.exists().then_some(path)
	}

	pub fn border_type(&self) -> BorderType {
		parse_border_type(&self.border_style)
	}

	pub fn background(&self) -> Color {
		parse_color(&self.background_color)
	}

	pub fn title(&self) -> Color {
		parse_color(&self.title_color)
	}

	pub fn border(&self) -> Color {
		parse_color(&self.border_color)
	}

	pub fn stage_border(&self) -> Color {
		parse_color(&self.stage_border_color)
	}

	pub fn rolling(&self) -> Color {
		parse_color(&self.rolling_color)
	}

	pub fn winner(&self) -> Color {
		parse_color(&self.winner_color)
	}

	pub fn idle(&self) -> Color {
		parse_color(&self.idle_color)
	}

	pub fn history_latest(&self) -> Color {
		parse_color(&self.history_latest_color)
	}

	pub fn history(&self) -> Color {
		parse_color(&self.history_color)
	}

	pub fn stat_value(&self) -> Color {
		parse_color(&self.stat_value_color)
	}

	pub fn stat_winner(&self) -> Color {
		parse_color(&self.stat_winner_color)
	}

	pub fn duplicate(&self) -> Color {
		parse_color(&self.duplicate_color)
	}

	pub fn entry(&self) -> Color {
		parse_color(&self.entry_color)
	}

	pub fn group_border(&self) -> Color {
		parse_color(&self.group_border_color)
	}

	pub fn group_title(&self) -> Color {
		parse_color(&self.group_title_color)
	}

	pub fn status(&self) -> Color {
		parse_color(&self.status_color)
	}

	pub fn status_alert(&self) -> Color {
		parse_color(&self.status_alert_color)
	}

	pub fn status_prompt(&self) -> Color {
		parse_color(&self.status_prompt_color)
	}
}

fn parse_color(s: &str) -> Color {
	match s.to_lowercase().as_str() {
		"black" => Color::Black,
		"red" => Color::Red,
		"green" => Color::Green,
		"yellow" => Color::Yellow,
		"blue" => Color::Blue,
		"magenta" => Color::Magenta,
		"cyan" => Color::Cyan,
		"gray" | "grey" => Color::Gray,
		"dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
		"light_red" | "lightred" => Color::LightRed,
		"light_green" | "lightgreen" => Color::LightGreen,
		"light_yellow" | "lightyellow" => Color::LightYellow,
		"light_blue" | "lightblue" => Color::LightBlue,
		"light_magenta" | "lightmagenta" => Color::LightMagenta,
		"light_cyan" | "lightcyan" => Color::LightCyan,
		"white" => Color::White,
		_ => {
			if let Some(hex) = s.strip_prefix('#') {
				if let Ok(rgb) = u32::from_str_radix(hex, 16) {
					let r = ((rgb >> 16) & 0xFF) as u8;
					let g = ((rgb >> 8) & 0xFF) as u8;
					let b = (rgb & 0xFF) as u8;
					return Color::Rgb(r, g, b);
				}
			}
			if let Some(inner) = s.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
				let parts: Vec<&str> = inner.split(',').collect();
				if parts.len() == 3 {
					if let (Ok(r), Ok(g), Ok(b)) = (
						parts[0].trim().parse::<u8>(),
						parts[1].trim().parse::<u8>(),
						parts[2].trim().parse::<u8>(),
					) {
						return Color::Rgb(r, g, b);
					}
				}
			}
			Color::White
		}
	}
}

fn parse_border_type(s: &str) -> BorderType {
	match s.to_lowercase().as_str() {
		"double" => BorderType::Double,
		"thick" => BorderType::Thick,
		"rounded" => BorderType::Rounded,
		_ => BorderType::Plain,
	}
}
