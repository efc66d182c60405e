use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
	#[default]
	Lottery,
	Grouping,
}

impl Tab {
	pub fn other(self) -> Self {
		match self {
			Tab::Lottery => Tab::Grouping,
			Tab::Grouping => Tab::Lottery,
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			Tab::Lottery => "Lottery",
			Tab::Grouping => "Groups",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputState {
	Browsing { tab: Tab },
	Editing { tab: Tab },
	EnteringPath { tab: Tab, path: String },
	EnteringGroupSize { text: String },
	ConfirmOverwrite { tab: Tab },
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputEffect {
	None,
	SetPrompt(String),
	ClearPrompt,
	SwitchTab(Tab),
	StartDraw,
	GenerateGroups,
	AdjustGroupSize(isize),
	ScrollGroups(isize),
	CycleTheme,
	SetGroupSize(String),
	InsertChar(char),
	Newline,
	Backspace,
	LoadDemo,
	RemoveDuplicates,
	LoadFile(String),
	SubmitImport,
	ConfirmOverwrite,
	Quit,
}

impl Default for InputState {
	fn default() -> Self {
		Self::Browsing { tab: Tab::Lottery }
	}
}

const EDITOR_HELP: &str = "[Ctrl-S] import  [Ctrl-D] demo list  [Ctrl-R] remove duplicates  [Ctrl-O] open file  [Esc] close";

impl InputState {
	pub fn tab(&self) -> Tab {
		match self {
			Self::Browsing { tab }
			| Self::Editing { tab }
			| Self::EnteringPath { tab, .. }
			| Self::ConfirmOverwrite { tab } => *tab,
			Self::EnteringGroupSize { .. } => Tab::Grouping,
		}
	}

	pub fn is_editing(&self) -> bool {
		matches!(self, Self::Editing { .. } | Self::EnteringPath { .. } | Self::ConfirmOverwrite { .. })
	}

	pub fn enter_editor(tab: Tab) -> (Self, InputEffect) {
		(Self::Editing { tab }, InputEffect::SetPrompt(EDITOR_HELP.into()))
	}

	pub fn ask_overwrite(tab: Tab) -> (Self, InputEffect) {
		(
			Self::ConfirmOverwrite { tab },
			InputEffect::SetPrompt(
				"Importing starts a new event and discards the current draw. Continue? [y/n]".into(),
			),
		)
	}

	pub fn handle_key(self, key: KeyCode, modifiers: KeyModifiers) -> (Self, InputEffect) {
		match self {
			Self::Browsing { tab: Tab::Lottery } => handle_lottery(key),
			Self::Browsing { tab: Tab::Grouping } => handle_grouping(key),
			Self::Editing { tab } => handle_editing(tab, key, modifiers),
			Self::EnteringPath { tab, path } => handle_entering_path(tab, path, key),
			Self::EnteringGroupSize { text } => handle_entering_group_size(text, key),
			Self::ConfirmOverwrite { tab } => handle_confirm_overwrite(tab, key),
		}
	}
}

fn handle_lottery(key: KeyCode) -> (InputState, InputEffect) {
	let tab = Tab::Lottery;
	match key {
		KeyCode::Char(' ') | KeyCode::Enter => (InputState::Browsing { tab }, InputEffect::StartDraw),
		KeyCode::Char('i') => InputState::enter_editor(tab),
		KeyCode::Char('t') => (InputState::Browsing { tab }, InputEffect::CycleTheme),
		KeyCode::Tab | KeyCode::Char('g') => (
			InputState::Browsing { tab: tab.other() },
			InputEffect::SwitchTab(tab.other()),
		),
		KeyCode::Char('q') | KeyCode::Esc => (InputState::Browsing { tab }, InputEffect::Quit),
		_ => (InputState::Browsing { tab }, InputEffect::None),
	}
}

fn handle_grouping(key: KeyCode) -> (InputState, InputEffect) {
	let tab = Tab::Grouping;
	match key {
		KeyCode::Enter | KeyCode::Char('r') => (InputState::Browsing { tab }, InputEffect::GenerateGroups),
		KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
			(InputState::Browsing { tab }, InputEffect::AdjustGroupSize(1))
		}
		KeyCode::Char('-') | KeyCode::Left => {
			(InputState::Browsing { tab }, InputEffect::AdjustGroupSize(-1))
		}
		KeyCode::Up => (InputState::Browsing { tab }, InputEffect::ScrollGroups(-1)),
		KeyCode::Down => (InputState::Browsing { tab }, InputEffect::ScrollGroups(1)),
		KeyCode::Char('t') => (InputState::Browsing { tab }, InputEffect::CycleTheme),
		KeyCode::Char('s') => (
			InputState::EnteringGroupSize { text: String::new() },
			InputEffect::SetPrompt("Group size: _  [Enter] set  [Esc] cancel".into()),
		),
		KeyCode::Char('i') => InputState::enter_editor(tab),
		KeyCode::Tab | KeyCode::Char('l') => (
			InputState::Browsing { tab: tab.other() },
			InputEffect::SwitchTab(tab.other()),
		),
		KeyCode::Char('q') | KeyCode::Esc => (InputState::Browsing { tab }, InputEffect::Quit),
		_ => (InputState::Browsing { tab }, InputEffect::None),
	}
}

fn handle_editing(tab: Tab, key: KeyCode, modifiers: KeyModifiers) -> (InputState, InputEffect) {
	let state = InputState::Editing { tab };

	if modifiers.contains(KeyModifiers::CONTROL) {
		return match key {
			KeyCode::Char('s') => (state, InputEffect::SubmitImport),
			KeyCode::Char('d') => (state, InputEffect::LoadDemo),
			KeyCode::Char('r') => (state, InputEffect::RemoveDuplicates),
			KeyCode::Char('o') => (
				InputState::EnteringPath { tab, path: String::new() },
				InputEffect::SetPrompt(path_prompt("")),
			),
			KeyCode::Char('c') => (state, InputEffect::Quit),
			_ => (state, InputEffect::None),
		};
	}

	match key {
		KeyCode::Esc => (InputState::Browsing { tab }, InputEffect::ClearPrompt),
		KeyCode::Enter => (state, InputEffect::Newline),
		KeyCode::Backspace => (state, InputEffect::Backspace),
		KeyCode::Char(c) => (state, InputEffect::InsertChar(c)),
		_ => (state, InputEffect::None),
	}
}

fn path_prompt(path: &str) -> String {
	format!("Open file: {}_  [Enter] load  [Esc] cancel", path)
}

fn handle_entering_path(tab: Tab, mut path: String, key: KeyCode) -> (InputState, InputEffect) {
	match key {
		KeyCode::Enter => {
			let (state, _) = InputState::enter_editor(tab);
			(state, InputEffect::LoadFile(path))
		}
		KeyCode::Esc => InputState::enter_editor(tab),
		KeyCode::Backspace => {
			path.pop();
			let prompt = path_prompt(&path);
			(InputState::EnteringPath { tab, path }, InputEffect::SetPrompt(prompt))
		}
		KeyCode::Char(c) => {
			path.push(c);
			let prompt = path_prompt(&path);
			(InputState::EnteringPath { tab, path }, InputEffect::SetPrompt(prompt))
		}
		_ => (InputState::EnteringPath { tab, path }, InputEffect::None),
	}
}

fn handle_entering_group_size(mut text: String, key: KeyCode) -> (InputState, InputEffect) {
	let tab = Tab::Grouping;
	match key {
		KeyCode::Enter => (InputState::Browsing { tab }, InputEffect::SetGroupSize(text)),
		KeyCode::Esc => (InputState::Browsing { tab }, InputEffect::ClearPrompt),
		KeyCode::Backspace => {
			text.pop();
			let prompt = format!("Group size: {}_  [Enter] set  [Esc] cancel", text);
			(InputState::EnteringGroupSize { text }, InputEffect::SetPrompt(prompt))
		}
		KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
			text.push(c);
			let prompt = format!("Group size: {}_  [Enter] set  [Esc] cancel", text);
			(InputState::EnteringGroupSize { text }, InputEffect::SetPrompt(prompt))
		}
		_ => (InputState::EnteringGroupSize { text }, InputEffect::None),
	}
}

fn handle_confirm_overwrite(tab: Tab, key: KeyCode) -> (InputState, InputEffect) {
	match key {
		KeyCode::Char('y') | KeyCode::Char('Y') => (InputState::Browsing { tab }, InputEffect::ConfirmOverwrite),
		KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => InputState::enter_editor(tab),
		_ => (InputState::ConfirmOverwrite { tab }, InputEffect::None),
	}
}
