pub mod embedding;
pub mod extractor;

mod error;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: format!("Default header {key} must be a string."),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

pub(crate) fn endpoint(api_base: &str, path: &str) -> String {
	format!("{}{}", api_base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn joins_endpoint_without_double_slash() {
		let expected = "http://127.0.0.1:8080/v1/embeddings";

		assert_eq!(endpoint("http://127.0.0.1:8080/", "/v1/embeddings"), expected);
		assert_eq!(endpoint("http://127.0.0.1:8080", "/v1/embeddings"), expected);
	}
}
