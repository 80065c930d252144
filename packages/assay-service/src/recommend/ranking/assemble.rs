use assay_domain::ScoredCandidate;

use crate::RecommendItem;

pub fn assemble_results(selected: &[ScoredCandidate]) -> Vec<RecommendItem> {
	selected
		.iter()
		.map(|candidate| RecommendItem {
			name: candidate.item.name.clone(),
			url: candidate.item.url.clone(),
			score: candidate.score,
			category_labels: candidate.item.category_labels.clone(),
			duration_minutes: candidate.item.duration_minutes,
		})
		.collect()
}
