use std::sync::Arc;

use crate::Item;

/// An item paired with a lower-is-better distance score.
///
/// Rescoring builds a new candidate; the item itself is shared.
#[derive(Clone, Debug)]
pub struct ScoredCandidate {
	pub item: Arc<Item>,
	pub score: f32,
}
impl ScoredCandidate {
	pub fn new(item: Arc<Item>, score: f32) -> Self {
		Self { item, score }
	}

	pub fn with_score(&self, score: f32) -> Self {
		Self { item: Arc::clone(&self.item), score }
	}

	pub fn url(&self) -> &str {
		self.item.url.as_str()
	}
}
