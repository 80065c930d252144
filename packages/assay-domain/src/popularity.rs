use std::collections::HashMap;

/// Historical selection counts keyed by item URL.
///
/// Built once and never mutated afterwards, so it can be shared across concurrent queries
/// behind an `Arc` without locking.
#[derive(Clone, Debug, Default)]
pub struct PopularityStore {
	counts: HashMap<String, u32>,
}
impl PopularityStore {
	pub fn new(counts: HashMap<String, u32>) -> Self {
		Self { counts }
	}

	/// Unknown URLs count as zero.
	pub fn count(&self, url: &str) -> u32 {
		self.counts.get(url).copied().unwrap_or(0)
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}
}
impl FromIterator<(String, u32)> for PopularityStore {
	fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
		Self { counts: iter.into_iter().collect() }
	}
}
