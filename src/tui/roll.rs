use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollStep {
	Spinning,
	Finished,
}

/// The spinner shown while a draw is pending. It only ever looks at its own
/// snapshot of names and its own RNG; the real draw happens after `Finished`.
pub struct Roll {
	candidates: Vec<String>,
	generation: u64,
	started: Instant,
	tick: Duration,
	duration: Duration,
	ticks_shown: u64,
	display: String,
	rng: StdRng,
}

impl Roll {
	pub fn start(
		candidates: Vec<String>,
		generation: u64,
		tick: Duration,
		duration: Duration,
		now: Instant,
	) -> Self {
		let mut roll = Self {
			candidates,
			generation,
			started: now,
			tick: tick.max(Duration::from_millis(1)),
			duration,
			ticks_shown: 0,
			display: String::new(),
			rng: StdRng::from_os_rng(),
		};
		roll.spin();
		roll
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn display(&self) -> &str {
		&self.display
	}

	pub fn elapsed(&self, now: Instant) -> Duration {
		now.saturating_duration_since(self.started)
	}

	pub fn poll(&mut self, now: Instant) -> RollStep {
		let elapsed = self.elapsed(now);
		if elapsed >= self.duration {
			return RollStep::Finished;
		}

		let due = (elapsed.as_millis() / self.tick.as_millis()) as u64;
		if due > self.ticks_shown {
			self.ticks_shown = due;
			self.spin();
		}
		RollStep::Spinning
	}

	fn spin(&mut self) {
		if self.candidates.is_empty() {
			return;
		}
		let index = self.rng.random_range(0..self.candidates.len());
		self.display.clone_from(&self.candidates[index]);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn names(list: &[&str]) -> Vec<String> {
		list.iter().map(|s| s.to_string()).collect()
	}

	fn roll_at(now: Instant) -> Roll {
		Roll::start(
			names(&["A", "B", "C"]),
			4,
			Duration::from_millis(50),
			Duration::from_millis(1500),
			now,
		)
	}

	#[test]
	fn test_spins_until_duration() {
		let start = Instant::now();
		let mut roll = roll_at(start);

		assert_eq!(roll.poll(start), RollStep::Spinning);
		assert_eq!(roll.poll(start + Duration::from_millis(1499)), RollStep::Spinning);
		assert_eq!(roll.poll(start + Duration::from_millis(1500)), RollStep::Finished);
	}

	#[test]
	fn test_display_only_shows_candidates() {
		let start = Instant::now();
		let mut roll = roll_at(start);
		let candidates = names(&["A", "B", "C"]);

		for ms in (0..1500).step_by(10) {
			roll.poll(start + Duration::from_millis(ms));
			assert!(candidates.iter().any(|c| c == roll.display()));
		}
	}

	#[test]
	fn test_advances_once_per_tick() {
		let start = Instant::now();
		let mut roll = roll_at(start);

		roll.poll(start + Duration::from_millis(120));
		assert_eq!(roll.ticks_shown, 2);
		roll.poll(start + Duration::from_millis(140));
		assert_eq!(roll.ticks_shown, 2);
	}

	#[test]
	fn test_keeps_generation() {
		let roll = roll_at(Instant::now());
		assert_eq!(roll.generation(), 4);
	}

	#[test]
	fn test_empty_candidates_show_nothing() {
		let start = Instant::now();
		let mut roll = Roll::start(Vec::new(), 0, Duration::from_millis(50), Duration::from_millis(100), start);
		assert_eq!(roll.poll(start + Duration::from_millis(60)), RollStep::Spinning);
		assert_eq!(roll.display(), "");
	}

	#[test]
	fn test_zero_duration_finishes_immediately() {
		let start = Instant::now();
		let mut roll = Roll::start(names(&["A"]), 0, Duration::from_millis(50), Duration::ZERO, start);
		assert_eq!(roll.poll(start), RollStep::Finished);
	}
}
