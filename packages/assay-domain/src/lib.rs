pub mod candidate;
pub mod catalog;
pub mod intent;
pub mod popularity;

pub use candidate::ScoredCandidate;
pub use catalog::{GENERAL_CATEGORY, Item, ItemId};
pub use intent::{JobLevel, ParsedIntent};
pub use popularity::PopularityStore;
