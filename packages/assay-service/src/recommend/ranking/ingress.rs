use std::collections::HashSet;

use assay_domain::ScoredCandidate;

/// Normalizes a raw retrieval result into the candidate pool.
///
/// Retrieval order is kept. Candidates with a non-finite score are dropped, a repeated URL
/// keeps its first occurrence, and the pool is capped at `k`.
pub fn ingest_candidates(raw: Vec<ScoredCandidate>, k: usize) -> Vec<ScoredCandidate> {
	let mut seen = HashSet::new();
	let mut pool = Vec::with_capacity(raw.len().min(k));

	for candidate in raw {
		if pool.len() >= k {
			break;
		}
		if !candidate.score.is_finite() {
			tracing::warn!(
				url = candidate.url(),
				score = candidate.score,
				"Dropping candidate with non-finite score."
			);

			continue;
		}
		if !seen.insert(candidate.url().to_string()) {
			continue;
		}

		pool.push(candidate);
	}

	pool
}
