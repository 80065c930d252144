pub mod recommend;

mod error;

pub use error::{Error, Result};
pub use recommend::{
	RankingRequestOverride, RecommendItem, RecommendRequest, RecommendResponse,
	ranking::{RankingPolicy, rank_candidates, resolve_ranking_policy},
};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use assay_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use assay_domain::{PopularityStore, ScoredCandidate};
use assay_providers::{embedding, extractor};
use assay_storage::qdrant::QdrantStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub trait ExtractorProvider
where
	Self: Send + Sync,
{
	fn extract<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, Result<Value>>;
}

/// Nearest-neighbour lookup over the catalog.
///
/// Results come back closest first with lower-is-better distance scores, at most `k` of them.
pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		vector: Vec<f32>,
		k: u32,
	) -> BoxFuture<'a, Result<Vec<ScoredCandidate>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub extractor: Arc<dyn ExtractorProvider>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		extractor: Arc<dyn ExtractorProvider>,
	) -> Self {
		Self { embedding, extractor }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), extractor: provider }
	}
}

/// Shared, read-only state for answering recommendation queries.
///
/// Every query runs against its own candidate pool, so one instance can serve concurrent
/// callers behind an `Arc`.
pub struct AssayService {
	pub cfg: Config,
	pub index: Arc<dyn VectorIndex>,
	pub popularity: Arc<PopularityStore>,
	pub providers: Providers,
}
impl AssayService {
	pub fn new(cfg: Config, index: Arc<dyn VectorIndex>, popularity: Arc<PopularityStore>) -> Self {
		Self { cfg, index, popularity, providers: Providers::default() }
	}

	pub fn with_providers(
		cfg: Config,
		index: Arc<dyn VectorIndex>,
		popularity: Arc<PopularityStore>,
		providers: Providers,
	) -> Self {
		Self { cfg, index, popularity, providers }
	}
}

struct DefaultProviders;
impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}

impl ExtractorProvider for DefaultProviders {
	fn extract<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, Result<Value>> {
		Box::pin(async move { Ok(extractor::extract(cfg, messages).await?) })
	}
}

impl VectorIndex for QdrantStore {
	fn search<'a>(
		&'a self,
		vector: Vec<f32>,
		k: u32,
	) -> BoxFuture<'a, Result<Vec<ScoredCandidate>>> {
		Box::pin(async move { Ok(QdrantStore::search(self, vector, k).await?) })
	}
}
