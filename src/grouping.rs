use rand::Rng;

pub const DEFAULT_GROUP_SIZE: usize = 3;

/// Fisher-Yates over a copy of `names`.
pub fn shuffle<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<String> {
	let mut shuffled = names.to_vec();
	for i in (1..shuffled.len()).rev() {
		let j = rng.random_range(0..=i);
		shuffled.swap(i, j);
	}
	shuffled
}

/// Shuffles the names and cuts them into consecutive groups of `group_size`.
/// The last group holds the remainder. A size of zero is treated as one.
pub fn group<R: Rng + ?Sized>(names: &[String], group_size: usize, rng: &mut R) -> Vec<Vec<String>> {
	let size = group_size.max(1);
	shuffle(names, rng)
		.chunks(size)
		.map(|chunk| chunk.to_vec())
		.collect()
}

/// Parses a typed group size from its leading integer, so `"4 people"` and
/// `"2.5"` read as 4 and 2. No leading positive integer gives 1.
pub fn parse_group_size(text: &str) -> usize {
	let text = text.trim_start();
	let (negative, rest) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text.strip_prefix('+').unwrap_or(text)),
	};
	let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
	if negative || digits == 0 {
		return 1;
	}

	match rest[..digits].parse::<usize>() {
		Ok(n) => n.max(1),
		Err(_) => usize::MAX,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::collections::HashMap;

	fn names(list: &[&str]) -> Vec<String> {
		list.iter().map(|s| s.to_string()).collect()
	}

	fn sorted(mut v: Vec<String>) -> Vec<String> {
		v.sort();
		v
	}

	#[test]
	fn test_shuffle_is_permutation() {
		let mut rng = StdRng::seed_from_u64(3);
		let input = names(&["A", "B", "C", "D", "E", "F", "G"]);
		let out = shuffle(&input, &mut rng);
		assert_eq!(sorted(out), sorted(input));
	}

	#[test]
	fn test_shuffle_small_inputs() {
		let mut rng = StdRng::seed_from_u64(3);
		assert!(shuffle(&[], &mut rng).is_empty());
		assert_eq!(shuffle(&names(&["solo"]), &mut rng), names(&["solo"]));
	}

	#[test]
	fn test_shuffle_covers_all_permutations_evenly() {
		let mut rng = StdRng::seed_from_u64(11);
		let input = names(&["A", "B", "C"]);
		let mut counts: HashMap<Vec<String>, usize> = HashMap::new();

		for _ in 0..6000 {
			*counts.entry(shuffle(&input, &mut rng)).or_default() += 1;
		}

		assert_eq!(counts.len(), 6);
		for (perm, count) in &counts {
			assert!((800..1200).contains(count), "{:?} seen {} times", perm, count);
		}
	}

	#[test]
	fn test_group_sizes_with_remainder() {
		let mut rng = StdRng::seed_from_u64(5);
		let input = names(&["A", "B", "C", "D", "E"]);
		let groups = group(&input, 2, &mut rng);

		let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
		assert_eq!(sizes, vec![2, 2, 1]);
		assert_eq!(sorted(groups.concat()), sorted(input));
	}

	#[test]
	fn test_group_even_split() {
		let mut rng = StdRng::seed_from_u64(5);
		let input = names(&["A", "B", "C", "D", "E", "F"]);
		let groups = group(&input, 3, &mut rng);
		assert_eq!(groups.len(), 2);
		assert!(groups.iter().all(|g| g.len() == 3));
	}

	#[test]
	fn test_group_empty_input() {
		let mut rng = StdRng::seed_from_u64(5);
		for size in [1, 2, 10] {
			assert!(group(&[], size, &mut rng).is_empty());
		}
	}

	#[test]
	fn test_group_size_larger_than_list() {
		let mut rng = StdRng::seed_from_u64(5);
		let input = names(&["A", "B", "C"]);
		let groups = group(&input, 10, &mut rng);
		assert_eq!(groups.len(), 1);
		assert_eq!(sorted(groups[0].clone()), sorted(input));
	}

	#[test]
	fn test_group_zero_size_clamped() {
		let mut rng = StdRng::seed_from_u64(5);
		let groups = group(&names(&["A", "B"]), 0, &mut rng);
		assert_eq!(groups.len(), 2);
	}

	#[test]
	fn test_group_is_fresh_each_call() {
		let mut rng = StdRng::seed_from_u64(8);
		let input: Vec<String> = (0..20).map(|i| format!("n{}", i)).collect();
		let first = group(&input, 4, &mut rng);
		let second = group(&input, 4, &mut rng);
		assert_ne!(first, second);
	}

	#[test]
	fn test_group_deterministic_with_seed() {
		let input: Vec<String> = (0..12).map(|i| format!("n{}", i)).collect();
		let a = group(&input, 5, &mut StdRng::seed_from_u64(77));
		let b = group(&input, 5, &mut StdRng::seed_from_u64(77));
		assert_eq!(a, b);
	}

	#[test]
	fn test_parse_group_size() {
		assert_eq!(parse_group_size("4"), 4);
		assert_eq!(parse_group_size(" 12 "), 12);
		assert_eq!(parse_group_size("0"), 1);
		assert_eq!(parse_group_size("-3"), 1);
		assert_eq!(parse_group_size("abc"), 1);
		assert_eq!(parse_group_size(""), 1);
	}

	#[test]
	fn test_parse_group_size_reads_leading_integer() {
		assert_eq!(parse_group_size("4abc"), 4);
		assert_eq!(parse_group_size("2.5"), 2);
		assert_eq!(parse_group_size("+6"), 6);
		assert_eq!(parse_group_size("007"), 7);
		assert_eq!(parse_group_size("-2.5"), 1);
		assert_eq!(parse_group_size("x4"), 1);
		assert_eq!(parse_group_size("99999999999999999999999"), usize::MAX);
	}
}
