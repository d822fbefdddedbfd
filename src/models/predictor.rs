//! LED decision predictor.
//!
//! Owns the four loaded artifacts and turns a partial sensor reading into
//! an actuator label: merge over the column-mean defaults, project into
//! canonical order, scale, classify, map the class to its label string.

use crate::config::{AppConfig, LabelsConfig};
use crate::error::Result;
use crate::features::{merge_features, ColumnMeans, ColumnOrder};
use crate::models::classifier::{Classifier, OnnxClassifier};
use crate::models::loader::ArtifactLoader;
use crate::scaler::StandardScaler;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// Predictor for the LED actuator decision
pub struct LedPredictor {
    /// The trained model (locked because an ONNX run needs `&mut`)
    classifier: RwLock<Box<dyn Classifier>>,
    scaler: StandardScaler,
    means: ColumnMeans,
    order: ColumnOrder,
    labels: LabelsConfig,
}

impl LedPredictor {
    /// Load all artifacts from the configured directory and build a
    /// predictor over the real ONNX model
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let loader =
            ArtifactLoader::with_threads(&config.models.models_dir, config.models.onnx_threads);
        let artifacts = loader.load()?;

        let predictor = Self::with_classifier(
            Box::new(OnnxClassifier::new(artifacts.model)),
            artifacts.tables.scaler,
            artifacts.tables.means,
            artifacts.tables.order,
            config.labels.clone(),
        );

        info!(
            features = predictor.feature_count(),
            on = %predictor.labels.on,
            off = %predictor.labels.off,
            "Predictor initialized"
        );

        Ok(predictor)
    }

    /// Build a predictor over an arbitrary classifier implementation
    pub fn with_classifier(
        classifier: Box<dyn Classifier>,
        scaler: StandardScaler,
        means: ColumnMeans,
        order: ColumnOrder,
        labels: LabelsConfig,
    ) -> Self {
        Self {
            classifier: RwLock::new(classifier),
            scaler,
            means,
            order,
            labels,
        }
    }

    /// Number of features the loaded model expects
    pub fn feature_count(&self) -> usize {
        self.order.len()
    }

    /// Predict the LED decision for a partial sensor reading.
    ///
    /// Features absent from `reading` fall back to their column-mean
    /// defaults; keys outside the column order are ignored. Returns the
    /// configured on label for class 1 and the off label for class 0.
    pub fn predict(&self, reading: &HashMap<String, f64>) -> Result<String> {
        let raw = merge_features(&self.means, &self.order, reading)?;
        let scaled = self.scaler.transform(&raw)?;

        let class = {
            // A poisoned lock only means an earlier predict panicked; the
            // session holds no per-call state, so recover the guard.
            let mut classifier = self
                .classifier
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            classifier.predict(&scaled)?
        };

        let label = if class == 1 {
            self.labels.on.clone()
        } else {
            self.labels.off.clone()
        };

        debug!(class, label = %label, "LED decision");
        Ok(label)
    }
}
