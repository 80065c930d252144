use std::{path::PathBuf, sync::Arc};

use serde_json::Map;

use assay_config::{
	Config, EmbeddingProviderConfig, Intent, LlmProviderConfig, Popularity, Providers, Qdrant,
	Ranking, Search, Service, Storage,
};
use assay_domain::{Item, ItemId, PopularityStore, ScoredCandidate};

pub const TEST_VECTOR_DIM: u32 = 4;

/// Catalog item whose URL is also used as its name and id.
pub fn item(url: &str, duration_minutes: f32, categories: &[&str]) -> Arc<Item> {
	Arc::new(Item {
		id: ItemId::Text(url.to_string()),
		name: url.to_string(),
		url: url.to_string(),
		duration_minutes,
		category_labels: categories.iter().map(|category| category.to_string()).collect(),
		category_codes: Vec::new(),
	})
}

pub fn candidate(url: &str, duration_minutes: f32, category: &str, score: f32) -> ScoredCandidate {
	ScoredCandidate::new(item(url, duration_minutes, &[category]), score)
}

pub fn popularity(counts: &[(&str, u32)]) -> PopularityStore {
	counts.iter().map(|(url, count)| (url.to_string(), *count)).collect()
}

pub fn urls(candidates: &[ScoredCandidate]) -> Vec<&str> {
	candidates.iter().map(ScoredCandidate::url).collect()
}

/// The three-item pool used to illustrate the pipeline: `a` and `c` share a category, `b`
/// runs too long for a 50 minute bound.
pub fn reference_pool() -> Vec<ScoredCandidate> {
	vec![
		candidate("a", 30.0, "X", 0.1),
		candidate("b", 60.0, "Y", 0.2),
		candidate("c", 40.0, "X", 0.15),
	]
}

pub fn test_config() -> Config {
	Config {
		service: Service { log_level: "info".to_string() },
		storage: Storage {
			qdrant: Qdrant {
				url: "http://127.0.0.1:6334".to_string(),
				collection: "assay_test".to_string(),
				vector_dim: TEST_VECTOR_DIM,
				score_kind: "similarity".to_string(),
				vector_name: None,
			},
			popularity: Popularity { path: PathBuf::from("popularity.json") },
		},
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "key".to_string(),
				path: "/".to_string(),
				model: "m".to_string(),
				dimensions: TEST_VECTOR_DIM,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			llm_extractor: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "key".to_string(),
				path: "/".to_string(),
				model: "m".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				max_attempts: 1,
				default_headers: Map::new(),
			},
		},
		search: Search { candidate_k: 50, top_k: 10, query_prefix: None },
		intent: Intent { enabled: true },
		ranking: Ranking::default(),
	}
}
