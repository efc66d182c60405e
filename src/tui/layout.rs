use ratatui::layout::{Constraint, Direction, Layout, Rect};

const CARD_MIN_WIDTH: u16 = 20;
const MAX_COLUMNS: u16 = 4;

pub struct ScreenLayout {
	pub header: Rect,
	pub sidebar: Rect,
	pub main: Rect,
	pub status: Rect,
}

impl ScreenLayout {
	pub fn compute(area: Rect) -> Self {
		let rows = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(3),
				Constraint::Min(10),
				Constraint::Length(3),
			])
			.split(area);

		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([Constraint::Length(32), Constraint::Min(30)])
			.split(rows[1]);

		Self {
			header: rows[0],
			sidebar: columns[0],
			main: columns[1],
			status: rows[2],
		}
	}
}

/// Card rectangles for the groups view. Cards are laid out left to right in
/// up to four columns. The first visible row is always placed, clipped to
/// `area`; later rows that do not fit below it are left out.
pub fn group_cards(area: Rect, group_lens: &[usize], first_row: usize) -> Vec<(usize, Rect)> {
	let columns = (area.width / CARD_MIN_WIDTH).clamp(1, MAX_COLUMNS) as usize;
	let card_width = area.width / columns as u16;

	let mut cards = Vec::new();
	let mut y = area.y;
	let bottom = area.bottom();

	for (row, chunk) in group_lens.chunks(columns).enumerate().skip(first_row) {
		let tallest = chunk.iter().copied().max().unwrap_or(0);
		let mut height = u16::try_from(tallest).unwrap_or(u16::MAX).saturating_add(2);
		if y >= bottom {
			break;
		}
		if y.saturating_add(height) > bottom {
			if !cards.is_empty() {
				break;
			}
			height = bottom - y;
		}

		for (col, _) in chunk.iter().enumerate() {
			let index = row * columns + col;
			let x = area.x + col as u16 * card_width;
			cards.push((index, Rect::new(x, y, card_width, height)));
		}
		y = y.saturating_add(height);
	}

	cards
}

pub fn group_rows(area: Rect, group_count: usize) -> usize {
	let columns = (area.width / CARD_MIN_WIDTH).clamp(1, MAX_COLUMNS) as usize;
	group_count.div_ceil(columns)
}
