use std::fmt;

use serde::{Deserialize, Serialize};

/// Primary category for items that carry no category labels.
pub const GENERAL_CATEGORY: &str = "General";

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemId {
	Int(i64),
	Text(String),
}
impl fmt::Display for ItemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(id) => write!(f, "{id}"),
			Self::Text(id) => f.write_str(id),
		}
	}
}

/// Immutable catalog entry.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Item {
	pub id: ItemId,
	pub name: String,
	/// Result identity and popularity lookup key.
	pub url: String,
	/// Zero means the duration is unknown.
	pub duration_minutes: f32,
	pub category_labels: Vec<String>,
	pub category_codes: Vec<String>,
}
impl Item {
	/// First category label, or [`GENERAL_CATEGORY`] when there are none.
	pub fn primary_category(&self) -> &str {
		self.category_labels.first().map(String::as_str).unwrap_or(GENERAL_CATEGORY)
	}

	pub fn has_known_duration(&self) -> bool {
		self.duration_minutes > 0.0
	}
}
