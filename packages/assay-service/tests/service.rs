use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use serde_json::Value;

use assay_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use assay_domain::{PopularityStore, ScoredCandidate};
use assay_service::{
	AssayService, BoxFuture, EmbeddingProvider, Error, ExtractorProvider, Providers,
	RankingRequestOverride, RecommendRequest, Result, VectorIndex,
};
use assay_testkit::{candidate, popularity, reference_pool, test_config};

struct SpyEmbedding {
	texts: Mutex<Vec<String>>,
}
impl SpyEmbedding {
	fn new() -> Self {
		Self { texts: Mutex::new(Vec::new()) }
	}

	fn seen(&self) -> Vec<String> {
		self.texts.lock().map(|texts| texts.clone()).unwrap_or_default()
	}
}
impl EmbeddingProvider for SpyEmbedding {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		if let Ok(mut seen) = self.texts.lock() {
			seen.extend(texts.iter().cloned());
		}

		let vec = vec![0.0; cfg.dimensions as usize];

		Box::pin(async move { Ok(vec![vec; texts.len()]) })
	}
}

struct FailingEmbedding;
impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			Err(Error::Provider { message: "embedding provider unavailable".to_string() })
		})
	}
}

struct SpyExtractor {
	calls: AtomicUsize,
	reply: Option<Value>,
}
impl SpyExtractor {
	fn replying(reply: Value) -> Self {
		Self { calls: AtomicUsize::new(0), reply: Some(reply) }
	}

	fn failing() -> Self {
		Self { calls: AtomicUsize::new(0), reply: None }
	}

	fn count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl ExtractorProvider for SpyExtractor {
	fn extract<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [Value],
	) -> BoxFuture<'a, Result<Value>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let reply = self.reply.clone();

		Box::pin(async move {
			reply.ok_or_else(|| Error::Provider { message: "extractor timed out".to_string() })
		})
	}
}

struct StubIndex {
	pool: Vec<ScoredCandidate>,
	requested_k: AtomicUsize,
}
impl StubIndex {
	fn new(pool: Vec<ScoredCandidate>) -> Self {
		Self { pool, requested_k: AtomicUsize::new(0) }
	}
}
impl VectorIndex for StubIndex {
	fn search<'a>(
		&'a self,
		_vector: Vec<f32>,
		k: u32,
	) -> BoxFuture<'a, Result<Vec<ScoredCandidate>>> {
		self.requested_k.store(k as usize, Ordering::SeqCst);

		let hits = self.pool.iter().take(k as usize).cloned().collect();

		Box::pin(async move { Ok(hits) })
	}
}

struct UnavailableIndex;
impl VectorIndex for UnavailableIndex {
	fn search<'a>(
		&'a self,
		_vector: Vec<f32>,
		_k: u32,
	) -> BoxFuture<'a, Result<Vec<ScoredCandidate>>> {
		Box::pin(async move { Err(Error::Storage { message: "index not loaded".to_string() }) })
	}
}

fn build_service(
	cfg: Config,
	index: Arc<dyn VectorIndex>,
	store: PopularityStore,
	embedding: Arc<dyn EmbeddingProvider>,
	extractor: Arc<dyn ExtractorProvider>,
) -> AssayService {
	AssayService::with_providers(cfg, index, Arc::new(store), Providers::new(embedding, extractor))
}

fn reference_config() -> Config {
	let mut cfg = test_config();

	cfg.ranking.popularity_alpha = 0.01;

	cfg
}

fn duration_reply(max_minutes: u32) -> Value {
	serde_json::json!({
		"skills": ["java"],
		"job_level": "mid",
		"max_duration_minutes": max_minutes,
		"role_family": "engineering"
	})
}

fn result_urls(items: &[assay_service::RecommendItem]) -> Vec<&str> {
	items.iter().map(|item| item.url.as_str()).collect()
}

#[tokio::test]
async fn recommends_reference_pool_end_to_end() {
	let extractor = Arc::new(SpyExtractor::replying(duration_reply(50)));
	let service = build_service(
		reference_config(),
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[("a", 10)]),
		Arc::new(SpyEmbedding::new()),
		extractor.clone(),
	);
	let mut req = RecommendRequest::new("Java developer, under 50 minutes");

	req.top_k = Some(2);

	let response = service.recommend(req).await.expect("recommend failed");

	assert_eq!(result_urls(&response.items), vec!["a", "c"]);
	assert!(response.items[0].score.abs() < 1e-6);
	assert!((response.items[1].score - 0.15).abs() < 1e-6);
	assert_eq!(response.intent.max_duration_minutes, Some(50.0));
	assert_eq!(response.intent.skills, vec!["java".to_string()]);
	assert_eq!(extractor.count(), 1);
}

#[tokio::test]
async fn extractor_failure_ranks_without_constraints() {
	let service = build_service(
		reference_config(),
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[("a", 10)]),
		Arc::new(SpyEmbedding::new()),
		Arc::new(SpyExtractor::failing()),
	);
	let response =
		service.recommend(RecommendRequest::new("Java developer")).await.expect("recommend failed");

	assert_eq!(result_urls(&response.items), vec!["a", "b", "c"]);
	assert!(response.intent.is_empty());
}

#[tokio::test]
async fn malformed_intent_reply_degrades_to_empty_intent() {
	let service = build_service(
		reference_config(),
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[]),
		Arc::new(SpyEmbedding::new()),
		Arc::new(SpyExtractor::replying(Value::String("not an object".to_string()))),
	);
	let response =
		service.recommend(RecommendRequest::new("Java developer")).await.expect("recommend failed");

	assert_eq!(response.items.len(), 3);
	assert!(response.intent.is_empty());
}

#[tokio::test]
async fn unavailable_index_yields_empty_result() {
	let service = build_service(
		reference_config(),
		Arc::new(UnavailableIndex),
		popularity(&[]),
		Arc::new(SpyEmbedding::new()),
		Arc::new(SpyExtractor::replying(duration_reply(30))),
	);
	let response =
		service.recommend(RecommendRequest::new("Java developer")).await.expect("recommend failed");

	assert!(response.items.is_empty());
	assert_eq!(response.intent.max_duration_minutes, Some(30.0));
}

#[tokio::test]
async fn unavailable_embedding_yields_empty_result() {
	let service = build_service(
		reference_config(),
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[]),
		Arc::new(FailingEmbedding),
		Arc::new(SpyExtractor::failing()),
	);
	let response =
		service.recommend(RecommendRequest::new("Java developer")).await.expect("recommend failed");

	assert!(response.items.is_empty());
}

#[tokio::test]
async fn blank_query_is_rejected() {
	let extractor = Arc::new(SpyExtractor::replying(duration_reply(30)));
	let service = build_service(
		reference_config(),
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[]),
		Arc::new(SpyEmbedding::new()),
		extractor.clone(),
	);
	let err = service.recommend(RecommendRequest::new("   ")).await.expect_err("blank query");

	assert!(matches!(err, Error::InvalidRequest { .. }), "Unexpected error {err:?}");
	assert_eq!(extractor.count(), 0);
}

#[tokio::test]
async fn disabled_intent_skips_extractor() {
	let mut cfg = reference_config();

	cfg.intent.enabled = false;

	let extractor = Arc::new(SpyExtractor::replying(duration_reply(1)));
	let service = build_service(
		cfg,
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[]),
		Arc::new(SpyEmbedding::new()),
		extractor.clone(),
	);
	let response =
		service.recommend(RecommendRequest::new("Java developer")).await.expect("recommend failed");

	assert_eq!(response.items.len(), 3);
	assert_eq!(extractor.count(), 0);
}

#[tokio::test]
async fn query_prefix_is_prepended_before_embedding() {
	let mut cfg = reference_config();

	cfg.search.query_prefix = Some("query: ".to_string());

	let embedding = Arc::new(SpyEmbedding::new());
	let service = build_service(
		cfg,
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[]),
		embedding.clone(),
		Arc::new(SpyExtractor::failing()),
	);

	service.recommend(RecommendRequest::new("  Java developer ")).await.expect("recommend failed");

	assert_eq!(embedding.seen(), vec!["query: Java developer".to_string()]);
}

#[tokio::test]
async fn oversized_top_k_is_capped_at_candidate_k() {
	let index = Arc::new(StubIndex::new(reference_pool()));
	let service = build_service(
		reference_config(),
		index.clone(),
		popularity(&[]),
		Arc::new(SpyEmbedding::new()),
		Arc::new(SpyExtractor::failing()),
	);
	let mut req = RecommendRequest::new("Java developer");

	req.top_k = Some(u32::MAX);

	let response = service.recommend(req).await.expect("recommend failed");

	assert_eq!(index.requested_k.load(Ordering::SeqCst), 50);
	assert_eq!(result_urls(&response.items), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn invalid_ranking_override_is_rejected() {
	let service = build_service(
		reference_config(),
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[]),
		Arc::new(SpyEmbedding::new()),
		Arc::new(SpyExtractor::failing()),
	);
	let mut req = RecommendRequest::new("Java developer");

	req.ranking =
		Some(RankingRequestOverride { popularity_alpha: Some(-1.0), ..Default::default() });

	let err = service.recommend(req).await.expect_err("negative alpha must be rejected");

	assert!(matches!(err, Error::InvalidRequest { .. }), "Unexpected error {err:?}");
}

#[tokio::test]
async fn diversity_override_switches_to_truncation() {
	let pool = vec![
		candidate("x1", 20.0, "X", 0.1),
		candidate("x2", 20.0, "X", 0.2),
		candidate("y1", 20.0, "Y", 0.3),
	];
	let service = build_service(
		reference_config(),
		Arc::new(StubIndex::new(pool)),
		popularity(&[]),
		Arc::new(SpyEmbedding::new()),
		Arc::new(SpyExtractor::failing()),
	);
	let mut balanced = RecommendRequest::new("Java developer");

	balanced.top_k = Some(2);

	let mut truncated = balanced.clone();

	truncated.ranking =
		Some(RankingRequestOverride { diversity: Some(false), ..Default::default() });

	let balanced = service.recommend(balanced).await.expect("recommend failed");
	let truncated = service.recommend(truncated).await.expect("recommend failed");

	assert_eq!(result_urls(&balanced.items), vec!["x1", "y1"]);
	assert_eq!(result_urls(&truncated.items), vec!["x1", "x2"]);
}

#[tokio::test]
async fn concurrent_queries_share_one_service() {
	let service = Arc::new(build_service(
		reference_config(),
		Arc::new(StubIndex::new(reference_pool())),
		popularity(&[("a", 10)]),
		Arc::new(SpyEmbedding::new()),
		Arc::new(SpyExtractor::replying(duration_reply(50))),
	));
	let (first, second) = tokio::join!(
		service.recommend(RecommendRequest::new("Java developer")),
		service.recommend(RecommendRequest::new("Java team lead")),
	);
	let first = first.expect("recommend failed");
	let second = second.expect("recommend failed");

	assert_eq!(result_urls(&first.items), result_urls(&second.items));
	assert_eq!(result_urls(&first.items), vec!["a", "c"]);
}
