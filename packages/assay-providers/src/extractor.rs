use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

// Greedy: spans from the first `{` to the last `}` so nested objects survive.
static JSON_BLOCK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON block pattern must compile."));

/// Sends chat messages and returns the JSON object found in the reply.
///
/// Replies whose content holds no parseable JSON object are retried up to
/// `cfg.max_attempts` times; transport errors are returned immediately.
pub async fn extract(cfg: &assay_config::LlmProviderConfig, messages: &[Value]) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = crate::endpoint(&cfg.api_base, &cfg.path);
	let attempts = cfg.max_attempts.max(1);

	for attempt in 1..=attempts {
		let body = serde_json::json!({
			"model": cfg.model,
			"temperature": cfg.temperature,
			"messages": messages,
		});
		let res = client
			.post(&url)
			.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.json(&body)
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		match parse_extractor_json(json) {
			Ok(parsed) => return Ok(parsed),
			Err(err) => {
				tracing::debug!(attempt, error = %err, "Extractor reply was not usable JSON.");
			},
		}
	}

	Err(Error::invalid_response(format!(
		"Extractor response is not valid JSON after {attempts} attempts."
	)))
}

fn parse_extractor_json(json: Value) -> Result<Value> {
	if let Some(content) = json
		.get("choices")
		.and_then(Value::as_array)
		.and_then(|choices| choices.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|message| message.get("content"))
		.and_then(Value::as_str)
	{
		return parse_json_block(content);
	}
	if json.is_object() && json.get("choices").is_none() {
		return Ok(json);
	}

	Err(Error::invalid_response("Extractor response is missing JSON content."))
}

/// Parses the first `{...}` span of `content`, tolerating prose or code fences around it.
pub fn parse_json_block(content: &str) -> Result<Value> {
	let block = JSON_BLOCK
		.find(content)
		.map(|found| found.as_str())
		.ok_or_else(|| Error::invalid_response("Extractor content holds no JSON object."))?;

	Ok(serde_json::from_str(block)?)
}
