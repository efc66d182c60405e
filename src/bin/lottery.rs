use std::io::{self, stdout};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
	event::{self, Event, KeyEventKind},
	execute,
	terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use lucky_draw::config::{load_settings_auto, Settings};
use lucky_draw::defaults;
use lucky_draw::logging::{import as import_log, tui as log};
use lucky_draw::roster;
use lucky_draw::theme::Theme;
use lucky_draw::tui::{LotteryUI, LotteryUIAction};

const FRAME_POLL_MS: u64 = 20;

#[derive(Parser)]
#[command(name = "lottery")]
#[command(about = "Draw winners and shuffle groups from a name list")]
struct Cli {
	/// Text or CSV file to prefill the list editor with
	#[arg(short, long)]
	file: Option<String>,

	/// Seed for reproducible draws and groups
	#[arg(long, env = "LUCKY_DRAW_SEED")]
	seed: Option<u64>,

	#[arg(short, long, env = "LUCKY_DRAW_THEME")]
	theme: Option<String>,

	/// Starting group size for the groups tab
	#[arg(short, long)]
	group_size: Option<usize>,
}

fn build_settings(cli: &Cli) -> io::Result<Settings> {
	let mut settings = load_settings_auto().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
	if let Some(seed) = cli.seed {
		settings.draw.seed = Some(seed);
	}
	if let Some(size) = cli.group_size {
		settings.grouping.default_size = size.max(1);
	}
	if let Some(theme) = &cli.theme {
		settings.ui.theme = theme.clone();
	}
	Ok(settings)
}

fn main() -> io::Result<()> {
	let cli = Cli::parse();
	defaults::ensure_config();

	let settings = build_settings(&cli)?;
	let prefill = match &cli.file {
		Some(path) => {
			let text = roster::read_names_file(path)
				.map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?;
			import_log::file_loaded(path, text.len());
			Some(text)
		}
		None => None,
	};

	enable_raw_mode()?;
	let mut stdout = stdout();
	execute!(stdout, EnterAlternateScreen)?;
	let backend = CrosstermBackend::new(stdout);
	let mut terminal = Terminal::new(backend)?;

	let result = run_app(&mut terminal, &settings, prefill);

	disable_raw_mode()?;
	execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

	if let Err(e) = result {
		eprintln!("Error: {}", e);
	}

	Ok(())
}

fn run_app(
	terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
	settings: &Settings,
	prefill: Option<String>,
) -> io::Result<()> {
	let theme_name = settings.ui.theme.clone();
	let theme = Theme::load(&theme_name);
	let mut ui = LotteryUI::new(settings, theme, theme_name);

	if let Some(text) = prefill {
		ui.set_import_text(text);
		ui.open_editor();
	}

	log::event("started");

	loop {
		ui.tick(Instant::now());
		terminal.draw(|f| {
			let area = f.area();
			ui.render(f, area);
		})?;

		if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
			if let Event::Key(key) = event::read()? {
				if key.kind != KeyEventKind::Press {
					continue;
				}
				log::input(&format!("{:?} {:?}", key.code, key.modifiers));
				if let LotteryUIAction::Quit = ui.handle_key(key.code, key.modifiers) {
					log::event("user quit");
					break;
				}
			}
		}
	}

	ui.teardown();
	Ok(())
}
