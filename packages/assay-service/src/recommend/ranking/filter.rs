use assay_domain::{ParsedIntent, ScoredCandidate};

/// Drops candidates that run longer than the extracted duration bound plus `tolerance`.
///
/// Without a bound the input comes back unchanged. Items of unknown length (`0` minutes) are
/// always kept.
pub fn apply_constraints(
	candidates: Vec<ScoredCandidate>,
	intent: &ParsedIntent,
	tolerance: f32,
) -> Vec<ScoredCandidate> {
	let Some(max_minutes) = intent.max_duration_minutes else {
		return candidates;
	};

	candidates
		.into_iter()
		.filter(|candidate| {
			let keep = !candidate.item.has_known_duration()
				|| !exceeds_duration(candidate.item.duration_minutes, max_minutes, tolerance);

			if !keep {
				tracing::trace!(
					url = candidate.url(),
					duration_minutes = candidate.item.duration_minutes,
					max_minutes,
					"Candidate dropped by duration bound."
				);
			}

			keep
		})
		.collect()
}

pub fn exceeds_duration(duration_minutes: f32, max_minutes: f32, tolerance: f32) -> bool {
	duration_minutes > max_minutes + tolerance
}
