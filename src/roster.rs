use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::defaults;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
	pub name: String,
	pub is_duplicate: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportPreview {
	pub entries: Vec<Entry>,
	pub duplicate_count: usize,
	pub unique_count: usize,
}

impl ImportPreview {
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[derive(Debug)]
pub enum ImportError {
	EmptyInput,
	Read { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for ImportError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ImportError::EmptyInput => write!(f, "no valid names in list"),
			ImportError::Read { path, source } => {
				write!(f, "failed to read {}: {}", path.display(), source)
			}
		}
	}
}

impl std::error::Error for ImportError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ImportError::EmptyInput => None,
			ImportError::Read { source, .. } => Some(source),
		}
	}
}

fn is_separator(c: char) -> bool {
	c == '\n' || c == ','
}

/// Splits raw text on newlines and commas, trims every token and flags
/// repeats of an earlier token. Empty tokens are dropped, not counted.
pub fn normalize(raw: &str) -> Vec<Entry> {
	let mut seen = HashSet::new();

	raw.split(is_separator)
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(|name| Entry {
			name: name.to_string(),
			is_duplicate: !seen.insert(name),
		})
		.collect()
}

pub fn preview(raw: &str) -> ImportPreview {
	let entries = normalize(raw);
	let duplicate_count = entries.iter().filter(|e| e.is_duplicate).count();
	let unique_count = entries.len() - duplicate_count;

	ImportPreview {
		entries,
		duplicate_count,
		unique_count,
	}
}

pub fn unique_names(entries: &[Entry]) -> Vec<String> {
	entries
		.iter()
		.filter(|e| !e.is_duplicate)
		.map(|e| e.name.clone())
		.collect()
}

pub fn confirm_import(raw: &str) -> Result<Vec<String>, ImportError> {
	let names = unique_names(&normalize(raw));
	if names.is_empty() {
		return Err(ImportError::EmptyInput);
	}
	Ok(names)
}

pub fn remove_duplicates(raw: &str) -> String {
	unique_names(&normalize(raw)).join("\n")
}

/// Reads a local list file as flat text. CSV quoting and columns are not
/// interpreted; commas simply separate names.
pub fn read_names_file<P: AsRef<Path>>(path: P) -> Result<String, ImportError> {
	fs::read_to_string(&path).map_err(|source| ImportError::Read {
		path: path.as_ref().to_path_buf(),
		source,
	})
}

pub fn demo_names() -> Vec<String> {
	defaults::demo_list()
		.map(|text| unique_names(&normalize(text)))
		.unwrap_or_default()
}
