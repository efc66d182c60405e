use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
	Active,
	Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
	pub total: usize,
	pub remaining: usize,
	pub winners: usize,
}

/// One drawing event: the imported list, the names still eligible, and the
/// winners in the order they were drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
	original: Vec<String>,
	remaining: Vec<String>,
	winners: Vec<String>,
}

impl Session {
	pub fn new(names: Vec<String>) -> Self {
		Self {
			remaining: names.clone(),
			original: names,
			winners: Vec::new(),
		}
	}

	pub fn original(&self) -> &[String] {
		&self.original
	}

	pub fn remaining(&self) -> &[String] {
		&self.remaining
	}

	pub fn winners(&self) -> &[String] {
		&self.winners
	}

	pub fn last_winner(&self) -> Option<&str> {
		self.winners.last().map(String::as_str)
	}

	pub fn state(&self) -> DrawState {
		if self.remaining.is_empty() {
			DrawState::Exhausted
		} else {
			DrawState::Active
		}
	}

	pub fn is_exhausted(&self) -> bool {
		self.state() == DrawState::Exhausted
	}

	pub fn stats(&self) -> SessionStats {
		SessionStats {
			total: self.original.len(),
			remaining: self.remaining.len(),
			winners: self.winners.len(),
		}
	}

	/// Picks one remaining name uniformly, moving it from the pool to the end
	/// of the winners list. Returns `None` and changes nothing once the pool
	/// is empty.
	pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
		if self.remaining.is_empty() {
			return None;
		}

		let index = rng.random_range(0..self.remaining.len());
		let winner = self.remaining.swap_remove(index);
		self.winners.push(winner.clone());
		Some(winner)
	}
}

pub fn draw<R: Rng + ?Sized>(mut session: Session, rng: &mut R) -> (Option<String>, Session) {
	let winner = session.draw(rng);
	(winner, session)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::collections::HashSet;

	fn names(list: &[&str]) -> Vec<String> {
		list.iter().map(|s| s.to_string()).collect()
	}

	fn assert_invariants(session: &Session) {
		assert_eq!(
			session.remaining().len() + session.winners().len(),
			session.original().len()
		);
		let mut union: Vec<&String> = session.remaining().iter().chain(session.winners()).collect();
		union.sort();
		let mut original: Vec<&String> = session.original().iter().collect();
		original.sort();
		assert_eq!(union, original);
		let unique: HashSet<&String> = session.winners().iter().collect();
		assert_eq!(unique.len(), session.winners().len());
	}

	#[test]
	fn test_new_session_is_active() {
		let session = Session::new(names(&["A", "B"]));
		assert_eq!(session.state(), DrawState::Active);
		assert_eq!(session.stats(), SessionStats { total: 2, remaining: 2, winners: 0 });
		assert!(session.last_winner().is_none());
	}

	#[test]
	fn test_draw_moves_winner_from_pool() {
		let mut rng = StdRng::seed_from_u64(7);
		let mut session = Session::new(names(&["A", "B", "C"]));

		let winner = session.draw(&mut rng).unwrap();

		assert!(!session.remaining().contains(&winner));
		assert_eq!(session.last_winner(), Some(winner.as_str()));
		assert_invariants(&session);
	}

	#[test]
	fn test_draw_until_exhausted() {
		let mut rng = StdRng::seed_from_u64(42);
		let mut session = Session::new(names(&["A", "B", "C"]));

		for _ in 0..3 {
			assert!(session.draw(&mut rng).is_some());
			assert_invariants(&session);
		}

		assert_eq!(session.state(), DrawState::Exhausted);
		assert!(session.remaining().is_empty());
		assert_eq!(session.winners().len(), 3);

		let before = session.clone();
		assert!(session.draw(&mut rng).is_none());
		assert_eq!(session, before);
	}

	#[test]
	fn test_empty_session_draw_is_noop() {
		let mut rng = StdRng::seed_from_u64(1);
		let (winner, session) = draw(Session::new(Vec::new()), &mut rng);
		assert!(winner.is_none());
		assert!(session.is_exhausted());
		assert!(session.winners().is_empty());
	}

	#[test]
	fn test_same_seed_same_history() {
		let list = names(&["A", "B", "C", "D", "E", "F"]);
		let run = |seed| {
			let mut rng = StdRng::seed_from_u64(seed);
			let mut session = Session::new(list.clone());
			while session.draw(&mut rng).is_some() {}
			session.winners().to_vec()
		};
		assert_eq!(run(99), run(99));
	}

	#[test]
	fn test_first_draw_is_roughly_uniform() {
		let list = names(&["A", "B", "C", "D"]);
		let mut rng = StdRng::seed_from_u64(2024);
		let mut counts = [0usize; 4];

		for _ in 0..4000 {
			let mut session = Session::new(list.clone());
			let winner = session.draw(&mut rng).unwrap();
			let idx = list.iter().position(|n| *n == winner).unwrap();
			counts[idx] += 1;
		}

		for count in counts {
			assert!((800..1200).contains(&count), "skewed counts: {:?}", counts);
		}
	}
}
