//! Standard-scaler transform matching training-time normalization.
//!
//! The training pipeline exports the fitted `StandardScaler` parameters to
//! `scaler.json` as positionally aligned `mean` and `scale` arrays. Applying
//! the same `(x - mean) / scale` transform here keeps inference inputs on the
//! distribution the model was trained against.

use crate::error::{PredictorError, Result};
use serde::Deserialize;

/// Fitted standard-scaler parameters, positionally aligned with the
/// canonical column order.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        Self { mean, scale }.validated()
    }

    /// Check internal arity agreement. Deserialization bypasses `new`, so
    /// the loader calls this after parsing the artifact.
    pub fn validated(self) -> Result<Self> {
        if self.mean.len() != self.scale.len() {
            return Err(PredictorError::ShapeMismatch {
                expected: self.mean.len(),
                actual: self.scale.len(),
            });
        }
        Ok(self)
    }

    /// Fitted arity (number of features).
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Apply the training-time transform to one raw feature vector.
    ///
    /// Output is `f32` because that is what the ONNX model consumes.
    pub fn transform(&self, raw: &[f64]) -> Result<Vec<f32>> {
        if raw.len() != self.mean.len() {
            return Err(PredictorError::ShapeMismatch {
                expected: self.mean.len(),
                actual: raw.len(),
            });
        }

        Ok(raw
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| ((x - mean) / scale) as f32)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_applies_mean_and_scale() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 4.0]).unwrap();

        let scaled = scaler.transform(&[14.0, -8.0]).unwrap();
        assert_eq!(scaled, vec![2.0, -2.0]);
    }

    #[test]
    fn test_transform_preserves_length() {
        let scaler = StandardScaler::new(vec![1.0, 2.0, 3.0], vec![1.0, 1.0, 1.0]).unwrap();

        let scaled = scaler.transform(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(scaled.len(), scaler.len());
    }

    #[test]
    fn test_wrong_arity_is_shape_mismatch() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();

        let err = scaler.transform(&[1.0]).unwrap_err();
        match err {
            PredictorError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mean_scale_skew_rejected() {
        assert!(StandardScaler::new(vec![0.0, 0.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_deserialize_from_artifact_json() {
        let scaler: StandardScaler =
            serde_json::from_str(r#"{"mean": [1.0, 2.0], "scale": [0.5, 0.5]}"#).unwrap();
        let scaler = scaler.validated().unwrap();

        assert_eq!(scaler.len(), 2);
        assert_eq!(scaler.transform(&[2.0, 2.0]).unwrap(), vec![2.0, 0.0]);
    }
}
