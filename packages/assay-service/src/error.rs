pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<assay_providers::Error> for Error {
	fn from(err: assay_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<assay_storage::Error> for Error {
	fn from(err: assay_storage::Error) -> Self {
		match err {
			assay_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			err => Self::Storage { message: err.to_string() },
		}
	}
}

impl From<assay_config::Error> for Error {
	fn from(err: assay_config::Error) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_validation_keeps_its_message() {
		let err = Error::from(assay_config::Error::Validation {
			message: "ranking.popularity_alpha must be zero or greater.".to_string(),
		});

		assert!(matches!(
			&err,
			Error::InvalidRequest { message }
				if message == "ranking.popularity_alpha must be zero or greater."
		));
	}
}
