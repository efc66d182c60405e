use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use chrono::Local;

struct LogState {
	file: Option<std::fs::File>,
	current_date: String,
	session_id: String,
	draw_num: usize,
}

static LOG_STATE: Mutex<LogState> = Mutex::new(LogState {
	file: None,
	current_date: String::new(),
	session_id: String::new(),
	draw_num: 0,
});

fn today() -> String {
	Local::now().format("%Y-%m-%d").to_string()
}

fn timestamp() -> String {
	Local::now().format("%H:%M:%S%.3f").to_string()
}

fn ensure_log_file(state: &mut LogState) {
	let date = today();
	if state.current_date != date || state.file.is_none() {
		let _ = fs::create_dir_all("logs");
		let path = format!("logs/lucky-draw-{}.log", date);
		if let Ok(file) = OpenOptions::new()
			.create(true)
			.append(true)
			.open(&path)
		{
			state.file = Some(file);
			state.current_date = date;
		}
	}
}

pub fn set_session_id(session_id: u64) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.session_id = format!("{:08x}", session_id & 0xFFFFFFFF);
		state.draw_num = 0;
	}
}

pub fn set_draw_num(draw_num: usize) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.draw_num = draw_num;
	}
}

fn format_line(time: &str, session_id: &str, draw_num: usize, module: &str, log_type: &str, message: &str) -> String {
	let session_id = if session_id.is_empty() { "--------" } else { session_id };
	format!(
		"[{}][{}][D{}][{}:{}] {}\n",
		time,
		session_id,
		draw_num,
		module,
		log_type,
		message
	)
}

pub fn log(module: &str, log_type: &str, message: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		ensure_log_file(&mut state);

		let line = format_line(
			&timestamp(),
			&state.session_id,
			state.draw_num,
			module,
			log_type,
			message,
		);

		if let Some(ref mut file) = state.file {
			let _ = file.write_all(line.as_bytes());
			let _ = file.flush();
		}
	}
}

pub mod import {
	use super::log;

	pub fn previewed(total: usize, duplicates: usize) {
		log("Import", "PREVIEW", &format!("total={} duplicates={}", total, duplicates));
	}

	pub fn confirmed(names: usize, replaced_session: bool) {
		log("Import", "CONFIRM", &format!("names={} replaced={}", names, replaced_session));
	}

	pub fn rejected(reason: &str) {
		log("Import", "REJECT", reason);
	}

	pub fn file_loaded(path: &str, bytes: usize) {
		log("Import", "FILE", &format!("{} ({} bytes)", path, bytes));
	}
}

pub mod draw {
	use super::log;

	pub fn roll_started(pool: usize) {
		log("Draw", "ROLL", &format!("started pool={}", pool));
	}

	pub fn roll_cancelled(reason: &str) {
		log("Draw", "ROLL", &format!("cancelled: {}", reason));
	}

	pub fn winner(name: &str, remaining: usize) {
		log("Draw", "WINNER", &format!("{} (remaining: {})", name, remaining));
	}

	pub fn skipped(reason: &str) {
		log("Draw", "SKIP", reason);
	}

	pub fn exhausted(total: usize) {
		log("Draw", "DONE", &format!("all {} names drawn", total));
	}
}

pub mod groups {
	use super::log;

	pub fn generated(names: usize, group_size: usize, groups: usize) {
		log(
			"Groups",
			"GENERATE",
			&format!("names={} size={} groups={}", names, group_size, groups),
		);
	}
}

pub mod tui {
	use super::log;

	pub fn input(key: &str) {
		log("TUI", "INPUT", key);
	}

	pub fn event(msg: &str) {
		log("TUI", "EVENT", msg);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_format_line_with_session() {
		let line = format_line("12:00:00.000", "0000beef", 3, "Draw", "WINNER", "Alice");
		assert_eq!(line, "[12:00:00.000][0000beef][D3][Draw:WINNER] Alice\n");
	}

	#[test]
	fn test_format_line_without_session() {
		let line = format_line("12:00:00.000", "", 0, "TUI", "EVENT", "start");
		assert!(line.starts_with("[12:00:00.000][--------][D0]"));
	}

	#[test]
	fn test_format_line_key_input() {
		let line = format_line("09:30:00.250", "00c0ffee", 2, "TUI", "INPUT", "Char(' ') NONE");
		assert_eq!(line, "[09:30:00.250][00c0ffee][D2][TUI:INPUT] Char(' ') NONE
");
	}
}
