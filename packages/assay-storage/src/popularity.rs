use std::{collections::HashMap, fs, io::ErrorKind, path::Path};

use assay_domain::PopularityStore;

use crate::{Error, Result};

/// Loads a flat JSON object of `url -> count`.
///
/// A missing file is not an error: ranking simply runs without a popularity signal.
pub fn load(path: &Path) -> Result<PopularityStore> {
	let raw = match fs::read_to_string(path) {
		Ok(raw) => raw,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			tracing::warn!(path = %path.display(), "Popularity map not found; using an empty store.");

			return Ok(PopularityStore::default());
		},
		Err(err) => return Err(Error::ReadPopularity { path: path.to_path_buf(), source: err }),
	};

	parse(&raw).map_err(|err| Error::ParsePopularity { path: path.to_path_buf(), source: err })
}

pub fn parse(raw: &str) -> serde_json::Result<PopularityStore> {
	let counts: HashMap<String, u32> = serde_json::from_str(raw)?;

	Ok(PopularityStore::new(counts))
}
