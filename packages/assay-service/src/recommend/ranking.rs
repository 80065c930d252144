pub mod assemble;
pub mod diversity;
pub mod filter;
pub mod ingress;
pub mod policy;
pub mod rerank;

pub use policy::{RankingPolicy, resolve_ranking_policy};

use assay_domain::{ParsedIntent, PopularityStore, ScoredCandidate};

use crate::RecommendItem;

/// Turns a retrieval pool into at most `top_k` result rows.
///
/// Stages run in a fixed order: popularity rerank, duration filter, category-balanced
/// selection, assembly. The function is pure and leaves `pool` untouched.
pub fn rank_candidates(
	pool: &[ScoredCandidate],
	intent: &ParsedIntent,
	popularity: &PopularityStore,
	policy: &RankingPolicy,
	top_k: usize,
) -> Vec<RecommendItem> {
	let reranked = rerank::rerank_by_popularity(pool, popularity, policy.popularity_alpha);
	let reranked_count = reranked.len();
	let filtered = filter::apply_constraints(reranked, intent, policy.duration_tolerance_minutes);
	let filtered_count = filtered.len();
	let selected = if policy.diversity_enabled {
		diversity::select_balanced(filtered, top_k)
	} else {
		diversity::select_truncated(filtered, top_k)
	};

	tracing::debug!(
		pool = pool.len(),
		reranked = reranked_count,
		filtered = filtered_count,
		selected = selected.len(),
		diversity = policy.diversity_enabled,
		"Ranked candidate pool."
	);

	assemble::assemble_results(&selected)
}
