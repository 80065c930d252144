use assay_config::{Config, validate_non_negative};

use crate::{RankingRequestOverride, Result};

/// Ranking knobs for one query: configuration defaults with any request override applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankingPolicy {
	pub popularity_alpha: f32,
	pub duration_tolerance_minutes: f32,
	pub diversity_enabled: bool,
}
impl RankingPolicy {
	pub fn from_config(cfg: &Config) -> Self {
		Self {
			popularity_alpha: cfg.ranking.popularity_alpha,
			duration_tolerance_minutes: cfg.ranking.duration_tolerance_minutes,
			diversity_enabled: cfg.ranking.diversity.enabled,
		}
	}
}
impl Default for RankingPolicy {
	fn default() -> Self {
		Self {
			popularity_alpha: assay_config::DEFAULT_POPULARITY_ALPHA,
			duration_tolerance_minutes: assay_config::DEFAULT_DURATION_TOLERANCE_MINUTES,
			diversity_enabled: true,
		}
	}
}

pub fn resolve_ranking_policy(
	cfg: &Config,
	override_: Option<&RankingRequestOverride>,
) -> Result<RankingPolicy> {
	let base = RankingPolicy::from_config(cfg);
	let popularity_alpha =
		override_.and_then(|value| value.popularity_alpha).unwrap_or(base.popularity_alpha);
	let duration_tolerance_minutes = override_
		.and_then(|value| value.duration_tolerance_minutes)
		.unwrap_or(base.duration_tolerance_minutes);
	let diversity_enabled =
		override_.and_then(|value| value.diversity).unwrap_or(base.diversity_enabled);

	validate_non_negative("ranking.popularity_alpha", popularity_alpha)?;
	validate_non_negative("ranking.duration_tolerance_minutes", duration_tolerance_minutes)?;

	Ok(RankingPolicy { popularity_alpha, duration_tolerance_minutes, diversity_enabled })
}
