use std::{
	collections::HashSet,
	fs,
	path::{Path, PathBuf},
	sync::Arc,
	time::Instant,
};

use clap::Parser;
use color_eyre::eyre;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing_subscriber::EnvFilter;

use assay_config::Config;
use assay_service::{AssayService, RankingRequestOverride, RecommendRequest};
use assay_storage::{popularity, qdrant::QdrantStore};

#[derive(Debug, Parser)]
#[command(
	version = assay_cli::VERSION,
	rename_all = "kebab",
	styles = assay_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'd', value_name = "FILE")]
	pub dataset: PathBuf,
	#[arg(long, value_name = "N")]
	pub top_k: Option<u32>,
	#[arg(long, value_name = "X")]
	pub popularity_alpha: Option<f32>,
	#[arg(long)]
	pub no_diversity: bool,
}

#[derive(Debug, Deserialize)]
struct EvalDataset {
	name: Option<String>,
	queries: Vec<EvalQuery>,
}

#[derive(Debug, Deserialize)]
struct EvalQuery {
	id: Option<String>,
	query: String,
	#[serde(default)]
	expected_urls: Vec<String>,
}

#[derive(Debug, Serialize)]
struct EvalOutput {
	generated_at: String,
	dataset: EvalDatasetInfo,
	settings: EvalSettings,
	summary: EvalSummary,
	queries: Vec<QueryReport>,
}

#[derive(Debug, Serialize)]
struct EvalDatasetInfo {
	name: String,
	query_count: usize,
	scored_query_count: usize,
}

#[derive(Debug, Serialize)]
struct EvalSettings {
	config_path: String,
	candidate_k: u32,
	top_k: u32,
	popularity_alpha: f32,
	duration_tolerance_minutes: f32,
	diversity: bool,
	intent: bool,
}

#[derive(Debug, Serialize)]
struct EvalSummary {
	avg_recall_at_k: f64,
	avg_precision_at_k: f64,
	mean_rr: f64,
	latency_ms_p50: f64,
	latency_ms_p95: f64,
}

#[derive(Debug, Serialize)]
struct QueryReport {
	id: String,
	query: String,
	expected_count: usize,
	retrieved_count: usize,
	relevant_count: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	metrics: Option<Metrics>,
	latency_ms: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	max_duration_minutes: Option<f32>,
	expected_urls: Vec<String>,
	retrieved_urls: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
struct Metrics {
	recall_at_k: f64,
	precision_at_k: f64,
	rr: f64,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = assay_config::load(&args.config)?;

	init_tracing(&config);

	let dataset = load_dataset(args.dataset.as_path())?;
	let output = eval_config(args.config.as_path(), config, &dataset, &args).await?;
	let json = serde_json::to_string_pretty(&output)?;

	println!("{json}");

	Ok(())
}

fn init_tracing(config: &Config) {
	let filter = EnvFilter::try_new(config.service.log_level.as_str())
		.unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_dataset(path: &Path) -> color_eyre::Result<EvalDataset> {
	let raw = fs::read_to_string(path)?;
	let dataset: EvalDataset = serde_json::from_str(&raw)?;

	if dataset.queries.is_empty() {
		return Err(eyre::eyre!("Dataset must include at least one query."));
	}

	Ok(dataset)
}

/// Rows with a blank query are skipped; the rest keep their dataset position.
fn runnable_queries(dataset: &EvalDataset) -> Vec<(usize, &EvalQuery)> {
	dataset
		.queries
		.iter()
		.enumerate()
		.filter(|(index, query)| {
			let blank = query.query.trim().is_empty();

			if blank {
				tracing::warn!(
					row = index + 1,
					id = query.id.as_deref().unwrap_or(""),
					"Skipping dataset row with a blank query."
				);
			}

			!blank
		})
		.collect()
}

fn ranking_override(args: &Args) -> Option<RankingRequestOverride> {
	if args.popularity_alpha.is_none() && !args.no_diversity {
		return None;
	}

	Some(RankingRequestOverride {
		popularity_alpha: args.popularity_alpha,
		duration_tolerance_minutes: None,
		diversity: args.no_diversity.then_some(false),
	})
}

async fn eval_config(
	config_path: &Path,
	config: Config,
	dataset: &EvalDataset,
	args: &Args,
) -> color_eyre::Result<EvalOutput> {
	let index = QdrantStore::new(&config.storage.qdrant)?;
	let store = popularity::load(&config.storage.popularity.path)?;

	tracing::info!(
		collection = %config.storage.qdrant.collection,
		popularity_entries = store.len(),
		queries = dataset.queries.len(),
		"Evaluation starting."
	);

	let service = AssayService::new(config, Arc::new(index), Arc::new(store));
	let ranking = ranking_override(args);
	let candidate_k = service.cfg.search.candidate_k;
	let top_k = args.top_k.unwrap_or(service.cfg.search.top_k).min(candidate_k);
	let mut reports = Vec::with_capacity(dataset.queries.len());
	let mut latencies_ms = Vec::with_capacity(dataset.queries.len());

	for (index, query) in runnable_queries(dataset) {
		let request = RecommendRequest {
			query: query.query.clone(),
			top_k: Some(top_k),
			ranking: ranking.clone(),
		};
		let started = Instant::now();
		let response = service.recommend(request).await?;
		let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;
		let retrieved = unique_urls(response.items.iter().map(|item| item.url.as_str()));
		let expected: HashSet<&str> = query.expected_urls.iter().map(String::as_str).collect();
		let metrics = (!expected.is_empty()).then(|| compute_metrics(&retrieved, &expected));

		reports.push(QueryReport {
			id: query.id.clone().unwrap_or_else(|| format!("q{}", index + 1)),
			query: query.query.clone(),
			expected_count: expected.len(),
			retrieved_count: retrieved.len(),
			relevant_count: retrieved.iter().filter(|url| expected.contains(url.as_str())).count(),
			metrics,
			latency_ms,
			max_duration_minutes: response.intent.max_duration_minutes,
			expected_urls: query.expected_urls.clone(),
			retrieved_urls: retrieved,
		});
		latencies_ms.push(latency_ms);
	}

	let policy = assay_service::resolve_ranking_policy(&service.cfg, ranking.as_ref())?;
	let settings = EvalSettings {
		config_path: config_path.display().to_string(),
		candidate_k,
		top_k,
		popularity_alpha: policy.popularity_alpha,
		duration_tolerance_minutes: policy.duration_tolerance_minutes,
		diversity: policy.diversity_enabled,
		intent: service.cfg.intent.enabled,
	};
	let scored: Vec<Metrics> = reports.iter().filter_map(|report| report.metrics).collect();

	Ok(EvalOutput {
		generated_at: OffsetDateTime::now_utc().format(&Rfc3339)?,
		dataset: EvalDatasetInfo {
			name: dataset.name.clone().unwrap_or_else(|| "eval".to_string()),
			query_count: reports.len(),
			scored_query_count: scored.len(),
		},
		settings,
		summary: summarize(&scored, &latencies_ms),
		queries: reports,
	})
}

fn unique_urls<'a, I>(iter: I) -> Vec<String>
where
	I: Iterator<Item = &'a str>,
{
	let mut seen = HashSet::new();
	let mut out = Vec::new();

	for url in iter {
		if seen.insert(url) {
			out.push(url.to_string());
		}
	}

	out
}

fn compute_metrics(retrieved: &[String], expected: &HashSet<&str>) -> Metrics {
	let mut relevant_count = 0_usize;
	let mut first_hit: Option<usize> = None;

	for (idx, url) in retrieved.iter().enumerate() {
		if expected.contains(url.as_str()) {
			relevant_count += 1;

			if first_hit.is_none() {
				first_hit = Some(idx + 1);
			}
		}
	}

	let rr = first_hit.map(|rank| 1.0 / rank as f64).unwrap_or(0.0);
	let precision_at_k =
		if retrieved.is_empty() { 0.0 } else { relevant_count as f64 / retrieved.len() as f64 };
	let recall_at_k =
		if expected.is_empty() { 0.0 } else { relevant_count as f64 / expected.len() as f64 };

	Metrics { recall_at_k, precision_at_k, rr }
}

fn summarize(scored: &[Metrics], latencies_ms: &[f64]) -> EvalSummary {
	let count = scored.len().max(1) as f64;
	let avg_recall_at_k = scored.iter().map(|m| m.recall_at_k).sum::<f64>() / count;
	let avg_precision_at_k = scored.iter().map(|m| m.precision_at_k).sum::<f64>() / count;
	let mean_rr = scored.iter().map(|m| m.rr).sum::<f64>() / count;
	let mut sorted = latencies_ms.to_vec();

	sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

	EvalSummary {
		avg_recall_at_k,
		avg_precision_at_k,
		mean_rr,
		latency_ms_p50: percentile(&sorted, 0.50),
		latency_ms_p95: percentile(&sorted, 0.95),
	}
}

/// Linear interpolation between the closest ranks of an ascending slice.
fn percentile(values: &[f64], percentile: f64) -> f64 {
	if values.is_empty() {
		return 0.0;
	}

	let clamped = percentile.clamp(0.0, 1.0);
	let pos = clamped * (values.len() as f64 - 1.0);
	let lower = pos.floor() as usize;
	let upper = pos.ceil() as usize;

	if lower == upper {
		values[lower]
	} else {
		let weight = pos - lower as f64;

		values[lower] * (1.0 - weight) + values[upper] * weight
	}
}
