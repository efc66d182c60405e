use include_dir::{include_dir, Dir};
use std::fs;
use std::path::{Path, PathBuf};

static CONFIG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/config");

pub const APP_DIR: &str = "lucky-draw";

pub fn user_config_dir() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

pub fn ensure_config() {
	let Some(dest) = user_config_dir() else {
		return;
	};

	extract_dir(&CONFIG_DIR, &dest);
}

fn extract_dir(dir: &Dir, dest: &Path) {
	for file in dir.files() {
		let file_dest = dest.join(file.path());
		if !file_dest.exists() {
			if let Some(parent) = file_dest.parent() {
				let _ = fs::create_dir_all(parent);
			}
			let _ = fs::write(&file_dest, file.contents());
		}
	}

	for subdir in dir.dirs() {
		extract_dir(subdir, dest);
	}
}

pub fn demo_list() -> Option<&'static str> {
	CONFIG_DIR
		.get_file("demo_names.txt")
		.and_then(|file| file.contents_utf8())
}

pub fn embedded_theme(name: &str) -> Option<&'static str> {
	CONFIG_DIR
		.get_file(format!("themes/{}.toml", name))
		.and_then(|file| file.contents_utf8())
}

pub fn list_themes() -> Vec<String> {
	let mut themes = Vec::new();

	if let Some(dir) = CONFIG_DIR.get_dir("themes") {
		for file in dir.files() {
			if let Some(name) = file.path().file_stem() {
				themes.push(name.to_string_lossy().to_string());
			}
		}
	}

	if let Some(config_dir) = user_config_dir() {
		if let Ok(entries) = fs::read_dir(config_dir.join("themes")) {
			for entry in entries.flatten() {
				let path = entry.path();
				if path.extension().map(|e| e == "toml").unwrap_or(false) {
					if let Some(stem) = path.file_stem() {
						let name = stem.to_string_lossy().to_string();
						if !themes.contains(&name) {
							themes.push(name);
						}
					}
				}
			}
		}
	}

	themes.sort();
	themes
}
