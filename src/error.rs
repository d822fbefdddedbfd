//! Error taxonomy for artifact loading and LED inference

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading artifacts or serving a prediction
#[derive(Debug, Error)]
pub enum PredictorError {
    /// A required artifact file is absent, unreadable, or undeserializable.
    /// Fatal at startup: the predictor must not serve with partial state.
    #[error("missing artifact {}: {reason}", .path.display())]
    MissingArtifact { path: PathBuf, reason: String },

    /// A feature named in the column order has neither a column-mean default
    /// nor a caller-supplied value. Configuration error, not user input error.
    #[error("incomplete feature vector: no value or default for feature '{feature}'")]
    IncompleteFeatureVector { feature: String },

    /// Vector arity disagrees with what the scaler or model was fitted on.
    /// Indicates version skew between the loaded artifacts.
    #[error("shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// ONNX Runtime rejected the session setup or the inference call.
    #[error("model inference failed: {0}")]
    Inference(#[from] ort::Error),
}

/// Convenience result alias used throughout the library
pub type Result<T> = std::result::Result<T, PredictorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_names_path() {
        let err = PredictorError::MissingArtifact {
            path: PathBuf::from("models/scaler.json"),
            reason: "file not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("models/scaler.json"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_incomplete_feature_names_feature() {
        let err = PredictorError::IncompleteFeatureVector {
            feature: "Soil_Moisture".to_string(),
        };
        assert!(err.to_string().contains("Soil_Moisture"));
    }
}
