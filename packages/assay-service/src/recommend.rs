pub mod intent;
pub mod ranking;

use serde::{Deserialize, Serialize};

use crate::{AssayService, Error, Result};
use assay_domain::{ParsedIntent, ScoredCandidate};
use ranking::ingress;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RankingRequestOverride {
	pub popularity_alpha: Option<f32>,
	pub duration_tolerance_minutes: Option<f32>,
	pub diversity: Option<bool>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RecommendRequest {
	pub query: String,
	pub top_k: Option<u32>,
	pub ranking: Option<RankingRequestOverride>,
}
impl RecommendRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into(), top_k: None, ranking: None }
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RecommendItem {
	pub name: String,
	pub url: String,
	pub score: f32,
	pub category_labels: Vec<String>,
	pub duration_minutes: f32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RecommendResponse {
	pub items: Vec<RecommendItem>,
	pub intent: ParsedIntent,
}

impl AssayService {
	/// Recommends catalog items for a free-text hiring query.
	///
	/// Only a malformed request is an error. An unreachable embedding provider or index yields
	/// no items, and a failed intent extraction ranks without constraints. `top_k` is capped at
	/// `search.candidate_k`, and zero selects nothing.
	pub async fn recommend(&self, req: RecommendRequest) -> Result<RecommendResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must not be empty.".to_string() });
		}

		let policy = ranking::resolve_ranking_policy(&self.cfg, req.ranking.as_ref())?;
		let candidate_k = self.cfg.search.candidate_k;
		let top_k = req.top_k.unwrap_or(self.cfg.search.top_k).min(candidate_k);
		let intent = self.extract_intent(query).await;
		let pool = self.retrieve_candidates(query, candidate_k).await;
		let items =
			ranking::rank_candidates(&pool, &intent, &self.popularity, &policy, top_k as usize);

		tracing::debug!(
			candidate_k,
			top_k,
			pool = pool.len(),
			items = items.len(),
			max_duration_minutes = ?intent.max_duration_minutes,
			"Recommendation complete."
		);

		Ok(RecommendResponse { items, intent })
	}

	async fn extract_intent(&self, query: &str) -> ParsedIntent {
		if !self.cfg.intent.enabled {
			return ParsedIntent::default();
		}

		let messages = intent::build_intent_messages(query);

		let extracted =
			self.providers.extractor.extract(&self.cfg.providers.llm_extractor, &messages).await;

		match extracted {
			Ok(value) => ParsedIntent::from_value(&value),
			Err(err) => {
				tracing::warn!(
					error = %err,
					"Intent extraction failed; ranking without constraints."
				);

				ParsedIntent::default()
			},
		}
	}

	async fn retrieve_candidates(&self, query: &str, candidate_k: u32) -> Vec<ScoredCandidate> {
		match self.search_index(query, candidate_k).await {
			Ok(raw) => ingress::ingest_candidates(raw, candidate_k as usize),
			Err(err) => {
				tracing::warn!(
					error = %err,
					"Candidate retrieval failed; returning no results."
				);

				Vec::new()
			},
		}
	}

	async fn search_index(&self, query: &str, candidate_k: u32) -> Result<Vec<ScoredCandidate>> {
		let text = match self.cfg.search.query_prefix.as_deref() {
			Some(prefix) => format!("{prefix}{query}"),
			None => query.to_string(),
		};
		let embeddings = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, std::slice::from_ref(&text))
			.await?;
		let vector = embeddings.into_iter().next().ok_or_else(|| Error::Provider {
			message: "Embedding provider returned no vectors.".to_string(),
		})?;

		self.index.search(vector, candidate_k).await
	}
}
