use std::cmp::Ordering;

use assay_domain::{PopularityStore, ScoredCandidate};

/// Rescores every candidate as `score - alpha * popularity(url)` and sorts ascending.
///
/// The sort is stable, so equal scores keep their retrieval order and `alpha == 0` only sorts
/// by the original score. No candidate is ever dropped.
pub fn rerank_by_popularity(
	candidates: &[ScoredCandidate],
	popularity: &PopularityStore,
	alpha: f32,
) -> Vec<ScoredCandidate> {
	let mut reranked: Vec<ScoredCandidate> = candidates
		.iter()
		.map(|candidate| {
			let count = popularity.count(candidate.url());

			candidate.with_score(popularity_adjusted(candidate.score, count, alpha))
		})
		.collect();

	reranked.sort_by(|left, right| cmp_f32_asc(left.score, right.score));

	reranked
}

/// Distances are lower-is-better, so a popularity reward is subtracted.
pub fn popularity_adjusted(score: f32, count: u32, alpha: f32) -> f32 {
	score - alpha * count as f32
}

/// Ascending order with NaN sorted last.
pub fn cmp_f32_asc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
	}
}
