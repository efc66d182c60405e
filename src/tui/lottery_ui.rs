use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
	layout::{Alignment, Constraint, Direction, Layout, Rect},
	style::{Modifier, Style},
	text::{Line, Span},
	widgets::{Block, Borders, Paragraph},
	Frame,
};

use crate::config::Settings;
use crate::grouping;
use crate::logging::{self, draw as draw_log, groups as groups_log, import as import_log};
use crate::roster::{self, ImportError, ImportPreview};
use crate::session::{Session, SessionStats};
use crate::theme::Theme;
use crate::tui::input::{InputEffect, InputState, Tab};
use crate::tui::layout::ScreenLayout;
use crate::tui::roll::{Roll, RollStep};
use crate::tui::widgets::{EditorWidget, GroupsWidget, HistoryWidget, Stage, StageWidget, StatsWidget};

const WINNER_HIGHLIGHT_MS: u64 = 3000;

pub enum LotteryUIAction {
	None,
	Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
	Info,
	Prompt,
	Alert,
}

pub struct LotteryUI {
	session: Option<Session>,
	generation: u64,
	groups: Vec<Vec<String>>,
	group_size: usize,
	group_scroll: usize,
	import_text: String,
	preview: ImportPreview,
	pub input_state: InputState,
	pub status_message: Option<String>,
	status_kind: StatusKind,
	roll: Option<Roll>,
	winner_at: Option<Instant>,
	roll_tick: Duration,
	roll_duration: Duration,
	rng: StdRng,
	pub theme: Theme,
	theme_name: String,
}

impl LotteryUI {
	pub fn new(settings: &Settings, theme: Theme, theme_name: String) -> Self {
		let rng = match settings.draw.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => StdRng::from_os_rng(),
		};

		Self {
			session: None,
			generation: 0,
			groups: Vec::new(),
			group_size: settings.grouping.default_size.max(1),
			group_scroll: 0,
			import_text: String::new(),
			preview: ImportPreview::default(),
			input_state: InputState::default(),
			status_message: None,
			status_kind: StatusKind::Info,
			roll: None,
			winner_at: None,
			roll_tick: settings.roll.tick(),
			roll_duration: settings.roll.duration(),
			rng,
			theme,
			theme_name,
		}
	}

	pub fn session(&self) -> Option<&Session> {
		self.session.as_ref()
	}

	pub fn groups(&self) -> &[Vec<String>] {
		&self.groups
	}

	pub fn group_size(&self) -> usize {
		self.group_size
	}

	pub fn import_text(&self) -> &str {
		&self.import_text
	}

	pub fn preview(&self) -> &ImportPreview {
		&self.preview
	}

	pub fn is_rolling(&self) -> bool {
		self.roll.is_some()
	}

	pub fn stats(&self) -> SessionStats {
		self.session.as_ref().map(Session::stats).unwrap_or_default()
	}

	pub fn set_import_text(&mut self, text: String) {
		self.import_text = text;
		self.refresh_preview();
	}

	fn refresh_preview(&mut self) {
		self.preview = roster::preview(&self.import_text);
	}

	pub fn open_editor(&mut self) {
		let (state, effect) = InputState::enter_editor(self.input_state.tab());
		self.input_state = state;
		self.process_effect(effect, Instant::now());
	}

	pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> LotteryUIAction {
		self.handle_key_at(key, modifiers, Instant::now())
	}

	pub fn handle_key_at(&mut self, key: KeyCode, modifiers: KeyModifiers, now: Instant) -> LotteryUIAction {
		let old_state = std::mem::take(&mut self.input_state);
		let (new_state, effect) = old_state.handle_key(key, modifiers);
		self.input_state = new_state;
		self.process_effect(effect, now)
	}

	fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
		self.status_kind = kind;
		self.status_message = Some(message.into());
	}

	fn process_effect(&mut self, effect: InputEffect, now: Instant) -> LotteryUIAction {
		match effect {
			InputEffect::None => {}
			InputEffect::SetPrompt(prompt) => self.set_status(StatusKind::Prompt, prompt),
			InputEffect::ClearPrompt => self.status_message = None,
			InputEffect::SwitchTab(tab) => {
				self.status_message = None;
				logging::tui::event(&format!("tab {}", tab.title()));
			}
			InputEffect::StartDraw => self.start_draw(now),
			InputEffect::GenerateGroups => self.generate_groups(),
			InputEffect::AdjustGroupSize(delta) => {
				self.group_size = self.group_size.saturating_add_signed(delta).max(1);
				self.set_status(StatusKind::Info, format!("Group size: {}", self.group_size));
			}
			InputEffect::ScrollGroups(delta) => self.scroll_groups(delta),
			InputEffect::CycleTheme => self.cycle_theme(),
			InputEffect::SetGroupSize(text) => {
				self.group_size = grouping::parse_group_size(&text);
				self.set_status(StatusKind::Info, format!("Group size: {}", self.group_size));
			}
			InputEffect::InsertChar(c) => {
				self.import_text.push(c);
				self.refresh_preview();
			}
			InputEffect::Newline => {
				self.import_text.push('\n');
				self.refresh_preview();
			}
			InputEffect::Backspace => {
				self.import_text.pop();
				self.refresh_preview();
			}
			InputEffect::LoadDemo => {
				self.set_import_text(roster::demo_names().join("\n"));
				self.set_status(StatusKind::Info, "Demo list loaded. [Ctrl-S] to import.");
			}
			InputEffect::RemoveDuplicates => {
				let removed = self.preview.duplicate_count;
				self.set_import_text(roster::remove_duplicates(&self.import_text));
				self.set_status(StatusKind::Info, format!("Removed {} duplicates", removed));
			}
			InputEffect::LoadFile(path) => self.load_file(&path),
			InputEffect::SubmitImport => self.submit_import(),
			InputEffect::ConfirmOverwrite => self.commit_import(),
			InputEffect::Quit => {
				self.teardown();
				return LotteryUIAction::Quit;
			}
		}
		LotteryUIAction::None
	}

	fn load_file(&mut self, path: &str) {
		match roster::read_names_file(path.trim()) {
			Ok(text) => {
				import_log::file_loaded(path, text.len());
				self.set_import_text(text);
				self.set_status(
					StatusKind::Info,
					format!("Loaded {}. [Ctrl-S] to import.", path.trim()),
				);
			}
			Err(e) => {
				import_log::rejected(&e.to_string());
				self.set_status(StatusKind::Alert, e.to_string());
			}
		}
	}

	fn submit_import(&mut self) {
		import_log::previewed(self.preview.entries.len(), self.preview.duplicate_count);

		if self.preview.unique_count == 0 {
			import_log::rejected("empty list");
			self.set_status(StatusKind::Alert, format!("{}!", ImportError::EmptyInput));
			return;
		}

		if self.session.is_some() {
			let (state, effect) = InputState::ask_overwrite(self.input_state.tab());
			self.input_state = state;
			if let InputEffect::SetPrompt(prompt) = effect {
				self.set_status(StatusKind::Prompt, prompt);
			}
			return;
		}

		self.commit_import();
	}

	/// Replaces the session wholesale. Any roll in flight belongs to the old
	/// session and is dropped.
	fn commit_import(&mut self) {
		let names = match roster::confirm_import(&self.import_text) {
			Ok(names) => names,
			Err(e) => {
				import_log::rejected(&e.to_string());
				self.set_status(StatusKind::Alert, format!("{}!", e));
				return;
			}
		};

		if self.roll.take().is_some() {
			draw_log::roll_cancelled("new list imported");
		}

		let replaced = self.session.is_some();
		let count = names.len();
		self.generation = self.generation.wrapping_add(1);
		self.session = Some(Session::new(names));
		self.groups.clear();
		self.group_scroll = 0;
		self.winner_at = None;
		self.import_text.clear();
		self.refresh_preview();

		logging::set_session_id(self.generation);
		import_log::confirmed(count, replaced);

		let tab = self.input_state.tab();
		self.input_state = InputState::Browsing { tab };
		self.set_status(StatusKind::Info, format!("Imported {} names", count));
	}

	fn start_draw(&mut self, now: Instant) {
		if self.roll.is_some() {
			return;
		}

		let Some(session) = &self.session else {
			draw_log::skipped("no list");
			self.set_status(StatusKind::Alert, "Import a list first  [i]");
			return;
		};

		if session.is_exhausted() {
			draw_log::skipped("pool empty");
			self.set_status(StatusKind::Info, "The list is empty. Import a new list to start again.");
			return;
		}

		draw_log::roll_started(session.remaining().len());
		self.roll = Some(Roll::start(
			session.remaining().to_vec(),
			self.generation,
			self.roll_tick,
			self.roll_duration,
			now,
		));
		self.status_message = None;
	}

	/// Advances the spinner. When its window closes the real draw is made,
	/// exactly once, against the session the roll was started for.
	pub fn tick(&mut self, now: Instant) {
		let finished = match self.roll.as_mut() {
			Some(roll) => roll.poll(now) == RollStep::Finished,
			None => false,
		};
		if !finished {
			return;
		}

		let Some(roll) = self.roll.take() else {
			return;
		};
		// Re-import drops the roll already; this catches any path that swaps
		// the session without doing so.
		if roll.generation() != self.generation {
			draw_log::roll_cancelled("stale session");
			return;
		}

		let Some(session) = self.session.as_mut() else {
			return;
		};

		if let Some(winner) = session.draw(&mut self.rng) {
			logging::set_draw_num(session.winners().len());
			draw_log::winner(&winner, session.remaining().len());
			if session.is_exhausted() {
				draw_log::exhausted(session.original().len());
			}
			self.winner_at = Some(now);
		}
	}

	fn generate_groups(&mut self) {
		let names = match &self.session {
			Some(session) => session.original(),
			None => {
				self.set_status(StatusKind::Alert, "Import a list first  [i]");
				return;
			}
		};

		self.groups = grouping::group(names, self.group_size, &mut self.rng);
		self.group_scroll = 0;
		groups_log::generated(names.len(), self.group_size, self.groups.len());
		self.set_status(
			StatusKind::Info,
			format!("{} groups. [Enter] to shuffle again.", self.groups.len()),
		);
	}

	fn scroll_groups(&mut self, delta: isize) {
		self.group_scroll = self
			.group_scroll
			.saturating_add_signed(delta)
			.min(self.groups.len().saturating_sub(1));
	}

	/// Drops timers tied to the current view.
	pub fn teardown(&mut self) {
		if self.roll.take().is_some() {
			draw_log::roll_cancelled("view closed");
		}
	}

	pub fn cycle_theme(&mut self) {
		let available = Theme::list_available();
		if available.is_empty() {
			return;
		}

		let current_idx = available
			.iter()
			.position(|name| name == &self.theme_name)
			.unwrap_or(0);

		let next_idx = (current_idx + 1) % available.len();
		let next_name = &available[next_idx];

		if let Ok(new_theme) = Theme::load_named(next_name) {
			self.theme = new_theme;
			self.theme_name = next_name.clone();
			self.set_status(StatusKind::Info, format!("Theme: {}", next_name));
		}
	}

	fn stage(&self, now: Instant) -> (Stage<'_>, bool) {
		if let Some(roll) = &self.roll {
			return (Stage::Rolling(roll.display()), false);
		}
		let Some(session) = &self.session else {
			return (Stage::NoList, false);
		};
		match session.last_winner() {
			Some(name) => {
				let fresh = self
					.winner_at
					.map(|at| now.duration_since(at) < Duration::from_millis(WINNER_HIGHLIGHT_MS))
					.unwrap_or(false);
				(Stage::Winner(name), fresh)
			}
			None if session.is_exhausted() => (Stage::Finished, false),
			None => (Stage::Waiting, false),
		}
	}

	pub fn render(&self, frame: &mut Frame, area: Rect) {
		let bg = Block::default().style(Style::default().bg(self.theme.background()));
		frame.render_widget(bg, area);

		let layout = ScreenLayout::compute(area);
		let tab = self.input_state.tab();

		let tabs = Line::from(vec![
			Span::styled(" Lucky Draw ", Style::default().fg(self.theme.title()).add_modifier(Modifier::BOLD)),
			Span::raw("  "),
			tab_span(Tab::Lottery, tab, &self.theme),
			Span::raw(" "),
			tab_span(Tab::Grouping, tab, &self.theme),
		]);
		let header = Paragraph::new(tabs).block(
			Block::default()
				.borders(Borders::ALL)
				.border_type(self.theme.border_type())
				.border_style(Style::default().fg(self.theme.border())),
		);
		frame.render_widget(header, layout.header);

		let sidebar = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Length(5), Constraint::Min(3)])
			.split(layout.sidebar);
		frame.render_widget(StatsWidget::new(self.stats(), &self.theme), sidebar[0]);
		let winners: &[String] = self.session.as_ref().map(Session::winners).unwrap_or(&[]);
		frame.render_widget(HistoryWidget::new(winners, &self.theme), sidebar[1]);

		if self.input_state.is_editing() {
			let editor = EditorWidget::new(&self.import_text, &self.preview, &self.theme)
				.focused(matches!(self.input_state, InputState::Editing { .. }));
			frame.render_widget(editor, layout.main);
		} else {
			match tab {
				Tab::Lottery => {
					let (stage, fresh) = self.stage(Instant::now());
					frame.render_widget(StageWidget::new(stage, &self.theme).fresh(fresh), layout.main);
				}
				Tab::Grouping => {
					let groups = GroupsWidget::new(&self.groups, self.group_size, &self.theme)
						.scrolled(self.group_scroll);
					frame.render_widget(groups, layout.main);
				}
			}
		}

		let (status_text, status_style) = match (&self.status_message, self.status_kind) {
			(Some(msg), StatusKind::Alert) => (
				msg.clone(),
				Style::default().fg(self.theme.status_alert()).add_modifier(Modifier::BOLD),
			),
			(Some(msg), StatusKind::Prompt) => (msg.clone(), Style::default().fg(self.theme.status_prompt())),
			(Some(msg), StatusKind::Info) => (msg.clone(), Style::default().fg(self.theme.status())),
			(None, _) => (default_help(tab), Style::default().fg(self.theme.status())),
		};

		let status = Paragraph::new(status_text)
			.style(status_style)
			.alignment(Alignment::Left)
			.block(
				Block::default()
					.borders(Borders::ALL)
					.border_type(self.theme.border_type())
					.border_style(Style::default().fg(self.theme.border()))
					.title(" Status "),
			);
		frame.render_widget(status, layout.status);
	}
}

fn tab_span(tab: Tab, current: Tab, theme: &Theme) -> Span<'static> {
	let label = format!(" {} ", tab.title());
	if tab == current {
		Span::styled(label, Style::default().fg(theme.background()).bg(theme.title()).add_modifier(Modifier::BOLD))
	} else {
		Span::styled(label, Style::default().fg(theme.idle()))
	}
}

fn default_help(tab: Tab) -> String {
	match tab {
		Tab::Lottery => "[Space] draw  [i] edit list  [Tab] groups  [t] theme  [q] quit".to_string(),
		Tab::Grouping => "[Enter] shuffle  [+/-] size  [s] set size  [↑/↓] scroll  [Tab] lottery  [q] quit".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_settings() -> Settings {
		let mut settings = Settings::default();
		settings.draw.seed = Some(1234);
		settings
	}

	fn ui() -> LotteryUI {
		LotteryUI::new(&test_settings(), Theme::default(), "default".to_string())
	}

	fn import(ui: &mut LotteryUI, text: &str) {
		ui.set_import_text(text.to_string());
		ui.process_effect(InputEffect::SubmitImport, Instant::now());
	}

	fn finish_roll(ui: &mut LotteryUI, start: Instant) {
		ui.process_effect(InputEffect::StartDraw, start);
		assert!(ui.is_rolling());
		ui.tick(start + Duration::from_millis(500));
		assert!(ui.is_rolling());
		ui.tick(start + Duration::from_millis(1500));
		assert!(!ui.is_rolling());
	}

	#[test]
	fn test_import_creates_session() {
		let mut ui = ui();
		import(&mut ui, "Alice\nBob\nAlice\nCarol");

		let session = ui.session().unwrap();
		assert_eq!(session.original(), ["Alice", "Bob", "Carol"]);
		assert!(ui.import_text().is_empty());
	}

	#[test]
	fn test_empty_import_rejected_keeps_session() {
		let mut ui = ui();
		import(&mut ui, "A\nB");
		ui.set_import_text(" ,\n ".to_string());
		ui.process_effect(InputEffect::SubmitImport, Instant::now());

		assert_eq!(ui.session().unwrap().original().len(), 2);
		assert_eq!(ui.status_kind, StatusKind::Alert);
	}

	#[test]
	fn test_draw_commits_only_after_roll() {
		let mut ui = ui();
		import(&mut ui, "A\nB\nC");
		let start = Instant::now();

		ui.process_effect(InputEffect::StartDraw, start);
		ui.tick(start + Duration::from_millis(1000));
		assert!(ui.session().unwrap().winners().is_empty());

		ui.tick(start + Duration::from_millis(1500));
		assert_eq!(ui.session().unwrap().winners().len(), 1);
		assert_eq!(ui.session().unwrap().remaining().len(), 2);
	}

	#[test]
	fn test_roll_for_replaced_session_is_discarded() {
		let mut ui = ui();
		import(&mut ui, "A\nB\nC");
		let start = Instant::now();

		ui.process_effect(InputEffect::StartDraw, start);
		ui.generation = ui.generation.wrapping_add(1);
		ui.session = Some(Session::new(vec!["X".to_string(), "Y".to_string()]));

		ui.tick(start + Duration::from_millis(1500));
		assert!(!ui.is_rolling());
		let session = ui.session().unwrap();
		assert!(session.winners().is_empty());
		assert_eq!(session.remaining().len(), 2);
	}

	#[test]
	fn test_second_draw_ignored_while_rolling() {
		let mut ui = ui();
		import(&mut ui, "A\nB\nC");
		let start = Instant::now();

		ui.process_effect(InputEffect::StartDraw, start);
		ui.process_effect(InputEffect::StartDraw, start + Duration::from_millis(100));
		ui.tick(start + Duration::from_millis(1500));
		ui.tick(start + Duration::from_millis(1700));

		assert_eq!(ui.session().unwrap().winners().len(), 1);
	}

	#[test]
	fn test_draw_until_exhausted_then_noop() {
		let mut ui = ui();
		import(&mut ui, "A\nB\nC");
		let mut start = Instant::now();
		for _ in 0..3 {
			finish_roll(&mut ui, start);
			start += Duration::from_secs(2);
		}

		let session = ui.session().unwrap();
		assert!(session.is_exhausted());
		let mut winners = session.winners().to_vec();
		winners.sort();
		assert_eq!(winners, ["A", "B", "C"]);

		ui.process_effect(InputEffect::StartDraw, start);
		assert!(!ui.is_rolling());
		assert_eq!(ui.session().unwrap().winners().len(), 3);
	}

	#[test]
	fn test_draw_without_session_is_noop() {
		let mut ui = ui();
		ui.process_effect(InputEffect::StartDraw, Instant::now());
		assert!(!ui.is_rolling());
		assert!(ui.session().is_none());
	}

	#[test]
	fn test_reimport_asks_and_cancels_roll() {
		let mut ui = ui();
		import(&mut ui, "A\nB\nC");
		let start = Instant::now();
		ui.process_effect(InputEffect::StartDraw, start);

		import(&mut ui, "X\nY");
		assert!(matches!(ui.input_state, InputState::ConfirmOverwrite { .. }));
		assert_eq!(ui.session().unwrap().original(), ["A", "B", "C"]);

		ui.handle_key_at(KeyCode::Char('y'), KeyModifiers::NONE, start);
		assert!(!ui.is_rolling());
		ui.tick(start + Duration::from_millis(2000));

		let session = ui.session().unwrap();
		assert_eq!(session.original(), ["X", "Y"]);
		assert!(session.winners().is_empty());
	}

	#[test]
	fn test_reimport_declined_keeps_session() {
		let mut ui = ui();
		import(&mut ui, "A\nB");
		import(&mut ui, "X");
		ui.handle_key_at(KeyCode::Char('n'), KeyModifiers::NONE, Instant::now());

		assert_eq!(ui.session().unwrap().original(), ["A", "B"]);
		assert!(ui.input_state.is_editing());
		assert_eq!(ui.import_text(), "X");
	}

	#[test]
	fn test_teardown_drops_roll() {
		let mut ui = ui();
		import(&mut ui, "A\nB");
		let start = Instant::now();
		ui.process_effect(InputEffect::StartDraw, start);

		assert!(matches!(
			ui.handle_key_at(KeyCode::Char('q'), KeyModifiers::NONE, start),
			LotteryUIAction::Quit
		));
		ui.tick(start + Duration::from_millis(1500));
		assert!(ui.session().unwrap().winners().is_empty());
	}

	#[test]
	fn test_groups_use_full_list() {
		let mut ui = ui();
		import(&mut ui, "A\nB\nC\nD\nE");
		finish_roll(&mut ui, Instant::now());

		ui.process_effect(InputEffect::SetGroupSize("2".into()), Instant::now());
		ui.process_effect(InputEffect::GenerateGroups, Instant::now());

		let sizes: Vec<usize> = ui.groups().iter().map(Vec::len).collect();
		assert_eq!(sizes, vec![2, 2, 1]);
		assert_eq!(ui.session().unwrap().winners().len(), 1);
	}

	#[test]
	fn test_group_size_adjust_clamps() {
		let mut ui = ui();
		ui.process_effect(InputEffect::SetGroupSize("abc".into()), Instant::now());
		assert_eq!(ui.group_size(), 1);
		ui.process_effect(InputEffect::AdjustGroupSize(-1), Instant::now());
		assert_eq!(ui.group_size(), 1);
		ui.process_effect(InputEffect::AdjustGroupSize(1), Instant::now());
		assert_eq!(ui.group_size(), 2);
	}

	#[test]
	fn test_new_import_clears_groups() {
		let mut ui = ui();
		import(&mut ui, "A\nB\nC");
		ui.process_effect(InputEffect::GenerateGroups, Instant::now());
		assert!(!ui.groups().is_empty());

		import(&mut ui, "X\nY");
		ui.process_effect(InputEffect::ConfirmOverwrite, Instant::now());
		assert!(ui.groups().is_empty());
	}

	#[test]
	fn test_remove_duplicates_effect() {
		let mut ui = ui();
		ui.set_import_text("A\nA\nB".to_string());
		assert_eq!(ui.preview().duplicate_count, 1);

		ui.process_effect(InputEffect::RemoveDuplicates, Instant::now());
		assert_eq!(ui.import_text(), "A\nB");
		assert_eq!(ui.preview().duplicate_count, 0);
	}

	#[test]
	fn test_load_demo_fills_editor() {
		let mut ui = ui();
		ui.process_effect(InputEffect::LoadDemo, Instant::now());
		assert_eq!(ui.preview().unique_count, 25);
	}

	#[test]
	fn test_load_missing_file_alerts() {
		let mut ui = ui();
		ui.process_effect(InputEffect::LoadFile("/no/such/list.txt".into()), Instant::now());
		assert_eq!(ui.status_kind, StatusKind::Alert);
		assert!(ui.import_text().is_empty());
	}
}
