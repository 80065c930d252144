use std::collections::{HashMap, VecDeque};

use assay_domain::ScoredCandidate;

/// Picks up to `max_total` candidates, round-robin across primary categories.
///
/// Categories are visited in first-seen order and each keeps its incoming order. Every pass
/// takes the front candidate of each non-empty category; selection stops as soon as
/// `max_total` is reached, even in the middle of a pass.
pub fn select_balanced(candidates: Vec<ScoredCandidate>, max_total: usize) -> Vec<ScoredCandidate> {
	if candidates.is_empty() || max_total == 0 {
		return Vec::new();
	}

	let capacity = max_total.min(candidates.len());
	let mut keys: Vec<String> = Vec::new();
	let mut buckets: HashMap<String, VecDeque<ScoredCandidate>> = HashMap::new();

	for candidate in candidates {
		let key = candidate.item.primary_category().to_string();

		if !buckets.contains_key(&key) {
			keys.push(key.clone());
		}

		buckets.entry(key).or_default().push_back(candidate);
	}

	let mut selected = Vec::with_capacity(capacity);

	'passes: loop {
		let mut added = false;

		for key in &keys {
			let Some(candidate) = buckets.get_mut(key).and_then(VecDeque::pop_front) else {
				continue;
			};

			selected.push(candidate);

			added = true;

			if selected.len() == max_total {
				break 'passes;
			}
		}

		if !added {
			break;
		}
	}

	selected
}

/// Selection without category balancing: the first `max_total` candidates as given.
pub fn select_truncated(
	mut candidates: Vec<ScoredCandidate>,
	max_total: usize,
) -> Vec<ScoredCandidate> {
	candidates.truncate(max_total);

	candidates
}
