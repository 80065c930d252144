use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_POPULARITY_ALPHA: f32 = 0.2;
pub const DEFAULT_DURATION_TOLERANCE_MINUTES: f32 = 5.0;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
	#[serde(default)]
	pub intent: Intent,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
	pub popularity: Popularity,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
	/// Either "similarity" (cosine or dot product, higher is closer) or "distance" (euclid,
	/// lower is closer).
	#[serde(default = "default_score_kind")]
	pub score_kind: String,
	/// Optional. Named vector to query when the collection stores more than one.
	pub vector_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Popularity {
	/// JSON object mapping assessment URLs to historical selection counts. A missing file
	/// yields an empty store.
	pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub llm_extractor: LlmProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default = "default_max_attempts")]
	pub max_attempts: u32,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub candidate_k: u32,
	pub top_k: u32,
	/// Optional. Prepended to the query before embedding, e.g. "query: " for E5 models.
	pub query_prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Intent {
	pub enabled: bool,
}
impl Default for Intent {
	fn default() -> Self {
		Self { enabled: true }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub popularity_alpha: f32,
	pub duration_tolerance_minutes: f32,
	pub diversity: RankingDiversity,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			popularity_alpha: DEFAULT_POPULARITY_ALPHA,
			duration_tolerance_minutes: DEFAULT_DURATION_TOLERANCE_MINUTES,
			diversity: RankingDiversity::default(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RankingDiversity {
	pub enabled: bool,
}
impl Default for RankingDiversity {
	fn default() -> Self {
		Self { enabled: true }
	}
}

fn default_score_kind() -> String {
	"similarity".to_string()
}

fn default_max_attempts() -> u32 {
	3
}
