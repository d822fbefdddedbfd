//! Artifact loader for the trained LED controller.
//!
//! The training pipeline exports four artifacts into one directory: the
//! random-forest model as ONNX plus three JSON tables (scaler parameters,
//! column means, column order). All four are mandatory; the loader fails
//! fast with the offending path before touching any of them.

use crate::error::{PredictorError, Result};
use crate::features::{ColumnMeans, ColumnOrder};
use crate::scaler::StandardScaler;
use ort::session::{builder::GraphOptimizationLevel, Session};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed artifact filenames under the configured directory
pub const MODEL_FILE: &str = "model_rf.onnx";
pub const SCALER_FILE: &str = "scaler.json";
pub const MEANS_FILE: &str = "column_means.json";
pub const ORDER_FILE: &str = "column_order.json";

const ALL_FILES: [&str; 4] = [MODEL_FILE, SCALER_FILE, MEANS_FILE, ORDER_FILE];

/// Loaded ONNX model with metadata
#[derive(Debug)]
pub struct LoadedModel {
    /// ONNX Runtime session
    pub session: Session,
    /// Input name for the model
    pub input_name: String,
    /// Output carrying the int64 class label, if the export names one
    pub label_output: Option<String>,
    /// Output carrying class probabilities, if the export names one
    pub prob_output: Option<String>,
}

/// The three JSON artifacts, cross-validated against each other
#[derive(Debug)]
pub struct ArtifactTables {
    pub scaler: StandardScaler,
    pub means: ColumnMeans,
    pub order: ColumnOrder,
}

/// Everything needed to serve predictions
#[derive(Debug)]
pub struct LoadedArtifacts {
    pub model: LoadedModel,
    pub tables: ArtifactTables,
}

/// Loader rooted at the configured artifacts directory
pub struct ArtifactLoader {
    base_dir: PathBuf,
    onnx_threads: usize,
}

impl ArtifactLoader {
    /// Create a loader with default settings (1 inference thread)
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_threads(base_dir, 1)
    }

    /// Create a loader with a specific ONNX thread count
    pub fn with_threads<P: AsRef<Path>>(base_dir: P, onnx_threads: usize) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            onnx_threads,
        }
    }

    fn artifact_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    /// Load all four artifacts.
    ///
    /// Existence of every file is checked up front so a missing artifact is
    /// reported by name before any deserialization work starts.
    pub fn load(&self) -> Result<LoadedArtifacts> {
        for filename in ALL_FILES {
            let path = self.artifact_path(filename);
            if !path.exists() {
                return Err(PredictorError::MissingArtifact {
                    path,
                    reason: "file not found".to_string(),
                });
            }
        }

        let tables = self.load_tables()?;
        let model = self.load_model()?;

        info!(
            dir = %self.base_dir.display(),
            features = tables.order.len(),
            "All artifacts loaded"
        );

        Ok(LoadedArtifacts { model, tables })
    }

    /// Load and cross-validate the three JSON artifacts.
    ///
    /// Arity or feature-name skew between the files means the directory
    /// holds artifacts from different training runs; that is a fatal
    /// configuration error, caught here rather than at call time.
    pub fn load_tables(&self) -> Result<ArtifactTables> {
        let scaler: StandardScaler = self.read_json(SCALER_FILE)?;
        let scaler = scaler.validated()?;
        let means: ColumnMeans = self.read_json(MEANS_FILE)?;
        let order: ColumnOrder = self.read_json(ORDER_FILE)?;

        for name in order.names() {
            if means.get(name).is_none() {
                return Err(PredictorError::IncompleteFeatureVector {
                    feature: name.to_string(),
                });
            }
        }

        if scaler.len() != order.len() {
            return Err(PredictorError::ShapeMismatch {
                expected: order.len(),
                actual: scaler.len(),
            });
        }

        info!(features = order.len(), "Feature tables loaded");

        Ok(ArtifactTables {
            scaler,
            means,
            order,
        })
    }

    /// Load the ONNX model and capture its input/output names
    pub fn load_model(&self) -> Result<LoadedModel> {
        let path = self.artifact_path(MODEL_FILE);

        ort::init().commit()?;
        info!(path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(&path)
            .map_err(|e| PredictorError::MissingArtifact {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        // sklearn-onnx classifier exports name an int64 "label" output and a
        // float "probabilities" output.
        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .map(|o| o.name.clone());

        let prob_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob") || o.name.contains("output"))
            .map(|o| o.name.clone());

        info!(
            input = %input_name,
            label_output = ?label_output,
            prob_output = ?prob_output,
            "Model loaded successfully"
        );

        Ok(LoadedModel {
            session,
            input_name,
            label_output,
            prob_output,
        })
    }

    fn read_json<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.artifact_path(filename);

        let contents =
            std::fs::read_to_string(&path).map_err(|e| PredictorError::MissingArtifact {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        serde_json::from_str(&contents).map_err(|e| PredictorError::MissingArtifact {
            path,
            reason: e.to_string(),
        })
    }
}
