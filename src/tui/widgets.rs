use ratatui::{
	buffer::Buffer,
	layout::{Alignment, Constraint, Direction, Layout, Rect},
	style::{Modifier, Style},
	text::{Line, Span},
	widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::roster::ImportPreview;
use crate::session::SessionStats;
use crate::theme::Theme;
use crate::tui::layout::{group_cards, group_rows};

fn truncate(name: &str, width: usize) -> String {
	if name.chars().count() > width && width > 1 {
		let cut: String = name.chars().take(width - 1).collect();
		format!("{}…", cut)
	} else {
		name.to_string()
	}
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
	Block::default()
		.borders(Borders::ALL)
		.border_type(theme.border_type())
		.border_style(Style::default().fg(theme.border()))
		.title(Span::styled(title, Style::default().fg(theme.title())))
}

pub struct StatsWidget<'a> {
	stats: SessionStats,
	theme: &'a Theme,
}

impl<'a> StatsWidget<'a> {
	pub fn new(stats: SessionStats, theme: &'a Theme) -> Self {
		Self { stats, theme }
	}
}

impl Widget for StatsWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let block = panel(" List ", self.theme);
		let inner = block.inner(area);
		block.render(area, buf);

		let label = Style::default().fg(self.theme.status());
		let lines = vec![
			Line::from(vec![
				Span::styled("Remaining  ", label),
				Span::styled(
					self.stats.remaining.to_string(),
					Style::default().fg(self.theme.stat_value()).add_modifier(Modifier::BOLD),
				),
			]),
			Line::from(vec![
				Span::styled("Winners    ", label),
				Span::styled(
					self.stats.winners.to_string(),
					Style::default().fg(self.theme.stat_winner()).add_modifier(Modifier::BOLD),
				),
			]),
			Line::from(vec![
				Span::styled("Loaded     ", label),
				Span::styled(self.stats.total.to_string(), Style::default().fg(self.theme.stat_value())),
			]),
		];

		Paragraph::new(lines).render(inner, buf);
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
	NoList,
	Waiting,
	Rolling(&'a str),
	Winner(&'a str),
	Finished,
}

pub struct StageWidget<'a> {
	stage: Stage<'a>,
	fresh: bool,
	theme: &'a Theme,
}

impl<'a> StageWidget<'a> {
	pub fn new(stage: Stage<'a>, theme: &'a Theme) -> Self {
		Self { stage, fresh: false, theme }
	}

	pub fn fresh(mut self, fresh: bool) -> Self {
		self.fresh = fresh;
		self
	}
}

impl Widget for StageWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let (label, name, style) = match self.stage {
			Stage::NoList => (
				"",
				"Import a list first  [i]",
				Style::default().fg(self.theme.idle()),
			),
			Stage::Waiting => (
				"Current result",
				"Ready  [Space] draw",
				Style::default().fg(self.theme.idle()),
			),
			Stage::Rolling(name) => (
				"Drawing...",
				name,
				Style::default().fg(self.theme.rolling()).add_modifier(Modifier::BOLD),
			),
			Stage::Winner(name) => {
				let mut style = Style::default().fg(self.theme.winner()).add_modifier(Modifier::BOLD);
				if self.fresh {
					style = style.add_modifier(Modifier::REVERSED);
				}
				("Congratulations!", name, style)
			}
			Stage::Finished => (
				"",
				"All names drawn",
				Style::default().fg(self.theme.idle()),
			),
		};

		let block = Block::default()
			.borders(Borders::ALL)
			.border_type(self.theme.border_type())
			.border_style(Style::default().fg(self.theme.stage_border()))
			.title(Span::styled(" Draw ", Style::default().fg(self.theme.title())));
		let inner = block.inner(area);
		block.render(area, buf);

		let top = inner.height.saturating_sub(3) / 2;
		let mut lines: Vec<Line> = (0..top).map(|_| Line::raw("")).collect();
		lines.push(Line::styled(label, Style::default().fg(self.theme.title())));
		lines.push(Line::raw(""));
		lines.push(Line::styled(format!(" {} ", name), style));

		Paragraph::new(lines)
			.alignment(Alignment::Center)
			.render(inner, buf);
	}
}

/// Most recent winner first, numbered in draw order.
pub struct HistoryWidget<'a> {
	winners: &'a [String],
	theme: &'a Theme,
}

impl<'a> HistoryWidget<'a> {
	pub fn new(winners: &'a [String], theme: &'a Theme) -> Self {
		Self { winners, theme }
	}
}

impl Widget for HistoryWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let block = panel(" Winners ", self.theme);
		let inner = block.inner(area);
		block.render(area, buf);

		if self.winners.is_empty() {
			Line::styled("Waiting for the first winner...", Style::default().fg(self.theme.idle()))
				.render(inner, buf);
			return;
		}

		let total = self.winners.len();
		let width = inner.width.saturating_sub(6) as usize;
		let lines: Vec<Line> = self
			.winners
			.iter()
			.rev()
			.take(inner.height as usize)
			.enumerate()
			.map(|(i, name)| {
				let style = if i == 0 {
					Style::default().fg(self.theme.history_latest()).add_modifier(Modifier::BOLD)
				} else {
					Style::default().fg(self.theme.history())
				};
				Line::from(vec![
					Span::styled(format!("#{:<4}", total - i), Style::default().fg(self.theme.idle())),
					Span::styled(truncate(name, width), style),
				])
			})
			.collect();

		Paragraph::new(lines).render(inner, buf);
	}
}

pub struct EditorWidget<'a> {
	text: &'a str,
	preview: &'a ImportPreview,
	focused: bool,
	theme: &'a Theme,
}

impl<'a> EditorWidget<'a> {
	pub fn new(text: &'a str, preview: &'a ImportPreview, theme: &'a Theme) -> Self {
		Self { text, preview, focused: false, theme }
	}

	pub fn focused(mut self, focused: bool) -> Self {
		self.focused = focused;
		self
	}
}

impl Widget for EditorWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let halves = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
			.split(area);

		let border = if self.focused {
			Style::default().fg(self.theme.status_prompt())
		} else {
			Style::default().fg(self.theme.border())
		};
		let editor_block = Block::default()
			.borders(Borders::ALL)
			.border_type(self.theme.border_type())
			.border_style(border)
			.title(Span::styled(" Edit list (one name per line) ", Style::default().fg(self.theme.title())));
		let editor_inner = editor_block.inner(halves[0]);
		editor_block.render(halves[0], buf);

		let mut text_lines: Vec<Line> = self.text.split('\n').map(Line::raw).collect();
		if self.focused {
			if let Some(last) = text_lines.last_mut() {
				last.push_span(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
			}
		}
		let skip = text_lines.len().saturating_sub(editor_inner.height as usize);
		Paragraph::new(text_lines.split_off(skip)).render(editor_inner, buf);

		let title = format!(
			" Total: {} | Duplicates: {} ",
			self.preview.entries.len(),
			self.preview.duplicate_count
		);
		let preview_block = panel(&title, self.theme);
		let preview_inner = preview_block.inner(halves[1]);
		preview_block.render(halves[1], buf);

		if self.preview.is_empty() {
			Line::styled("Paste names above...", Style::default().fg(self.theme.idle()))
				.render(preview_inner, buf);
			return;
		}

		let width = preview_inner.width.saturating_sub(12) as usize;
		let mut lines: Vec<Line> = self
			.preview
			.entries
			.iter()
			.map(|entry| {
				if entry.is_duplicate {
					Line::from(vec![
						Span::styled(truncate(&entry.name, width), Style::default().fg(self.theme.duplicate())),
						Span::styled(" [duplicate]", Style::default().fg(self.theme.duplicate())),
					])
				} else {
					Line::styled(truncate(&entry.name, width), Style::default().fg(self.theme.entry()))
				}
			})
			.collect();
		let skip = lines.len().saturating_sub(preview_inner.height as usize);
		Paragraph::new(lines.split_off(skip)).render(preview_inner, buf);
	}
}

pub struct GroupsWidget<'a> {
	groups: &'a [Vec<String>],
	group_size: usize,
	first_row: usize,
	theme: &'a Theme,
}

impl<'a> GroupsWidget<'a> {
	pub fn new(groups: &'a [Vec<String>], group_size: usize, theme: &'a Theme) -> Self {
		Self { groups, group_size, first_row: 0, theme }
	}

	pub fn scrolled(mut self, first_row: usize) -> Self {
		self.first_row = first_row;
		self
	}
}

impl Widget for GroupsWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let title = format!(" Groups | size {} ", self.group_size);
		let block = panel(&title, self.theme);
		let inner = block.inner(area);
		block.render(area, buf);

		if self.groups.is_empty() {
			Paragraph::new(vec![
				Line::raw(""),
				Line::styled("[Enter] generate groups   [+/-] size   [s] type size", Style::default().fg(self.theme.idle())),
			])
			.alignment(Alignment::Center)
			.wrap(Wrap { trim: true })
			.render(inner, buf);
			return;
		}

		let lens: Vec<usize> = self.groups.iter().map(Vec::len).collect();
		let first_row = self.first_row.min(group_rows(inner, lens.len()).saturating_sub(1));
		for (index, rect) in group_cards(inner, &lens, first_row) {
			let group = &self.groups[index];
			let card = Block::default()
				.borders(Borders::ALL)
				.border_type(self.theme.border_type())
				.border_style(Style::default().fg(self.theme.group_border()))
				.title(Span::styled(
					format!(" Group {} ", index + 1),
					Style::default().fg(self.theme.group_title()).add_modifier(Modifier::BOLD),
				))
				.title_bottom(Line::from(format!(" {} ", group.len())).right_aligned());
			let card_inner = card.inner(rect);
			card.render(rect, buf);

			let width = card_inner.width as usize;
			let lines: Vec<Line> = group
				.iter()
				.map(|name| Line::styled(truncate(name, width), Style::default().fg(self.theme.entry())))
				.collect();
			Paragraph::new(lines).render(card_inner, buf);
		}
	}
}
