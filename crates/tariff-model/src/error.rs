use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting or exporting a [`crate::TariffTable`].
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
    #[error("failed to serialize records: {0}")]
    Serialize(String),
}

impl From<polars::prelude::PolarsError> for ModelError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("hts8".into());
        let err: ModelError = polars_err.into();
        assert!(matches!(err, ModelError::DataFrame { .. }));
    }
}
