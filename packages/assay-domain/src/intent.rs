use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobLevel {
	Entry,
	Mid,
	Senior,
	#[default]
	Unknown,
}
impl JobLevel {
	pub fn parse(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"entry" => Self::Entry,
			"mid" => Self::Mid,
			"senior" => Self::Senior,
			_ => Self::Unknown,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Entry => "entry",
			Self::Mid => "mid",
			Self::Senior => "senior",
			Self::Unknown => "unknown",
		}
	}
}

/// Structured hints extracted from a hiring query.
///
/// Only `max_duration_minutes` constrains ranking. The remaining fields are carried through
/// to callers untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ParsedIntent {
	pub skills: Vec<String>,
	pub job_level: JobLevel,
	pub max_duration_minutes: Option<f32>,
	pub role_family: Option<String>,
}
impl ParsedIntent {
	/// Builds an intent from loosely shaped extractor JSON.
	///
	/// Never fails: anything that is not an object yields the empty intent and each field
	/// falls back to its default independently. A duration bound of zero or less is treated
	/// as absent.
	pub fn from_value(value: &Value) -> Self {
		let Some(object) = value.as_object() else {
			return Self::default();
		};

		Self {
			skills: object.get("skills").map(parse_skills).unwrap_or_default(),
			job_level: object
				.get("job_level")
				.and_then(Value::as_str)
				.map(JobLevel::parse)
				.unwrap_or_default(),
			max_duration_minutes: object.get("max_duration_minutes").and_then(parse_minutes),
			role_family: object
				.get("role_family")
				.and_then(Value::as_str)
				.map(str::trim)
				.filter(|family| !family.is_empty())
				.map(str::to_string),
		}
	}

	pub fn is_empty(&self) -> bool {
		self == &Self::default()
	}
}

fn parse_skills(value: &Value) -> Vec<String> {
	let raw: Vec<&str> = match value {
		Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
		Value::String(text) => text.split(',').collect(),
		_ => Vec::new(),
	};

	raw.into_iter().map(str::trim).filter(|skill| !skill.is_empty()).map(str::to_string).collect()
}

fn parse_minutes(value: &Value) -> Option<f32> {
	let minutes = match value {
		Value::Number(number) => number.as_f64()?,
		Value::String(text) => text.trim().parse::<f64>().ok()?,
		_ => return None,
	};

	(minutes.is_finite() && minutes > 0.0).then_some(minutes as f32)
}
