use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use lucky_draw::config::load_settings_auto;
use lucky_draw::grouping;
use lucky_draw::logging::{self, draw as draw_log, groups as groups_log, import as import_log};
use lucky_draw::roster::{self, ImportError};
use lucky_draw::session::Session;

#[derive(Parser)]
#[command(name = "lucky-draw-cli")]
#[command(about = "Check, draw from and group a name list without the TUI")]
struct Cli {
	/// Seed for reproducible results
	#[arg(long, global = true, env = "LUCKY_DRAW_SEED")]
	seed: Option<u64>,

	/// Print JSON instead of plain text
	#[arg(long, global = true)]
	json: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Show every entry and flag duplicates
	Check {
		/// List file, or '-' for stdin
		input: String,
	},
	/// Draw winners one at a time
	Draw {
		input: String,
		/// Number of winners; defaults to the whole list
		#[arg(short = 'n', long)]
		count: Option<usize>,
	},
	/// Shuffle the list into groups
	Group {
		input: String,
		/// Members per group; anything below 1 is treated as 1
		#[arg(short, long, allow_hyphen_values = true)]
		size: Option<String>,
	},
}

#[derive(Serialize)]
struct DrawReport<'a> {
	winners: &'a [String],
	remaining: &'a [String],
}

#[derive(Serialize)]
struct GroupReport<'a> {
	group_size: usize,
	groups: &'a [Vec<String>],
}

fn read_input(input: &str) -> Result<String, ImportError> {
	if input == "-" {
		let mut text = String::new();
		io::stdin()
			.read_to_string(&mut text)
			.map_err(|source| ImportError::Read { path: "<stdin>".into(), source })?;
		return Ok(text);
	}
	let text = roster::read_names_file(input)?;
	import_log::file_loaded(input, text.len());
	Ok(text)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
	let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
	println!("{}", out);
	Ok(())
}

fn run(cli: Cli) -> Result<(), String> {
	let settings = load_settings_auto()?;
	let mut rng = match cli.seed.or(settings.draw.seed) {
		Some(s) => StdRng::seed_from_u64(s),
		None => StdRng::from_os_rng(),
	};

	match cli.command {
		Command::Check { input } => {
			let text = read_input(&input).map_err(|e| e.to_string())?;
			let preview = roster::preview(&text);
			import_log::previewed(preview.entries.len(), preview.duplicate_count);

			if cli.json {
				return print_json(&preview);
			}
			for entry in &preview.entries {
				if entry.is_duplicate {
					println!("{}  (duplicate)", entry.name);
				} else {
					println!("{}", entry.name);
				}
			}
			println!(
				"\nTotal: {} | Duplicates: {} | Unique: {}",
				preview.entries.len(),
				preview.duplicate_count,
				preview.unique_count
			);
		}
		Command::Draw { input, count } => {
			let text = read_input(&input).map_err(|e| e.to_string())?;
			let names = roster::confirm_import(&text).map_err(|e| e.to_string())?;
			import_log::confirmed(names.len(), false);

			let mut session = Session::new(names);
			logging::set_session_id(rand::random());
			let count = count.unwrap_or(session.original().len());
			for _ in 0..count {
				let Some(winner) = session.draw(&mut rng) else {
					draw_log::skipped("pool empty");
					break;
				};
				logging::set_draw_num(session.winners().len());
				draw_log::winner(&winner, session.remaining().len());
			}

			if cli.json {
				return print_json(&DrawReport {
					winners: session.winners(),
					remaining: session.remaining(),
				});
			}
			for (i, winner) in session.winners().iter().enumerate() {
				println!("#{:<4}{}", i + 1, winner);
			}
			let stats = session.stats();
			println!("\nWinners: {} | Remaining: {} | Loaded: {}", stats.winners, stats.remaining, stats.total);
		}
		Command::Group { input, size } => {
			let text = read_input(&input).map_err(|e| e.to_string())?;
			let names = roster::confirm_import(&text).map_err(|e| e.to_string())?;
			let group_size = size
				.as_deref()
				.map(grouping::parse_group_size)
				.unwrap_or(settings.grouping.default_size);

			let groups = grouping::group(&names, group_size, &mut rng);
			groups_log::generated(names.len(), group_size, groups.len());

			if cli.json {
				return print_json(&GroupReport { group_size, groups: &groups });
			}
			for (i, group) in groups.iter().enumerate() {
				println!("Group {} ({})", i + 1, group.len());
				for member in group {
					println!("  {}", member);
				}
			}
		}
	}

	Ok(())
}

fn main() -> ExitCode {
	match run(Cli::parse()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("Error: {}", e);
			ExitCode::FAILURE
		}
	}
}
