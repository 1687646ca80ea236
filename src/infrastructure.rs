pub mod model;

use thiserror::Error;

use crate::domain::PredictionError;

pub use self::model::*;

/// モデル読み込みエラー
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed model artifact: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Incompatible model artifact: {0}")]
    Incompatible(String),
}

impl From<ModelError> for PredictionError {
    fn from(value: ModelError) -> Self {
        PredictionError::Model(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_into_prediction_error() {
        let error =
            PredictionError::from(ModelError::Incompatible("model has no trees".to_owned()));
        assert_eq!(
            error.to_string(),
            "Model error: Incompatible model artifact: model has no trees"
        );
    }
}
