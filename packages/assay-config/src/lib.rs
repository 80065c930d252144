mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_DURATION_TOLERANCE_MINUTES, DEFAULT_POPULARITY_ALPHA, EmbeddingProviderConfig,
	Intent, LlmProviderConfig, Popularity, Providers, Qdrant, Ranking, RankingDiversity, Search,
	Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.search.candidate_k == 0 {
		return Err(Error::Validation {
			message: "search.candidate_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.top_k == 0 {
		return Err(Error::Validation {
			message: "search.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.top_k > cfg.search.candidate_k {
		return Err(Error::Validation {
			message: "search.top_k must not exceed search.candidate_k.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection must be non-empty.".to_string(),
		});
	}
	if !matches!(cfg.storage.qdrant.score_kind.as_str(), "similarity" | "distance") {
		return Err(Error::Validation {
			message: "storage.qdrant.score_kind must be one of similarity or distance."
				.to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}

	validate_non_negative("ranking.popularity_alpha", cfg.ranking.popularity_alpha)?;
	validate_non_negative(
		"ranking.duration_tolerance_minutes",
		cfg.ranking.duration_tolerance_minutes,
	)?;

	if cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "Provider embedding api_key must be non-empty.".to_string(),
		});
	}
	if cfg.intent.enabled {
		if cfg.providers.llm_extractor.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: "Provider llm_extractor api_key must be non-empty when intent.enabled is true."
					.to_string(),
			});
		}
		if cfg.providers.llm_extractor.max_attempts == 0 {
			return Err(Error::Validation {
				message: "providers.llm_extractor.max_attempts must be greater than zero."
					.to_string(),
			});
		}
	}

	Ok(())
}

/// Shared check for tunable weights, also used for per-request overrides.
pub fn validate_non_negative(label: &str, value: f32) -> Result<()> {
	if !value.is_finite() {
		return Err(Error::Validation { message: format!("{label} must be a finite number.") });
	}
	if value < 0.0 {
		return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.search.query_prefix.as_deref().map(|prefix| prefix.trim().is_empty()).unwrap_or(false)
	{
		cfg.search.query_prefix = None;
	}
	if cfg.storage.qdrant.vector_name.as_deref().map(|name| name.trim().is_empty()).unwrap_or(false)
	{
		cfg.storage.qdrant.vector_name = None;
	}

	cfg.storage.qdrant.score_kind = cfg.storage.qdrant.score_kind.trim().to_lowercase();
}
