use std::sync::Arc;

use qdrant_client::qdrant::{Query, QueryPointsBuilder};

use assay_domain::ScoredCandidate;

use crate::{Error, Result, catalog};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreKind {
	/// Cosine or dot product: higher is closer.
	Similarity,
	/// Euclidean: lower is closer.
	Distance,
}
impl ScoreKind {
	pub fn parse(raw: &str) -> Result<Self> {
		match raw {
			"similarity" => Ok(Self::Similarity),
			"distance" => Ok(Self::Distance),
			other => Err(Error::InvalidArgument(format!("Unknown qdrant score kind {other:?}."))),
		}
	}

	/// Maps a raw qdrant score onto the lower-is-better scale used by ranking.
	pub fn to_distance(self, score: f32) -> f32 {
		match self {
			Self::Similarity => 1.0 - score,
			Self::Distance => score,
		}
	}
}

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
	pub vector_name: Option<String>,
	pub score_kind: ScoreKind,
}
impl QdrantStore {
	pub fn new(cfg: &assay_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self {
			client,
			collection: cfg.collection.clone(),
			vector_dim: cfg.vector_dim,
			vector_name: cfg.vector_name.clone(),
			score_kind: ScoreKind::parse(cfg.score_kind.as_str())?,
		})
	}

	/// Nearest catalog items for `vector`, closest first, with distance scores.
	pub async fn search(&self, vector: Vec<f32>, k: u32) -> Result<Vec<ScoredCandidate>> {
		if vector.len() != self.vector_dim as usize {
			return Err(Error::InvalidArgument(format!(
				"Query vector has {} dimensions, expected {}.",
				vector.len(),
				self.vector_dim
			)));
		}
		if k == 0 {
			return Ok(Vec::new());
		}

		let mut search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.limit(k as u64)
			.with_payload(true);

		if let Some(name) = self.vector_name.as_deref() {
			search = search.using(name);
		}

		let response = self.client.query(search).await?;
		let candidates = response
			.result
			.iter()
			.filter_map(|point| {
				let item = catalog::item_from_point(point)?;

				Some(ScoredCandidate::new(Arc::new(item), self.score_kind.to_distance(point.score)))
			})
			.collect();

		Ok(candidates)
	}
}
