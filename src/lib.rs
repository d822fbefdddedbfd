//! Greenhouse LED Inference Library
//!
//! Loads a pre-trained random-forest LED controller (ONNX model, standard
//! scaler, column-mean defaults, canonical column order) and turns partial
//! greenhouse sensor readings into a binary actuator decision.

pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod scaler;

pub use config::AppConfig;
pub use error::{PredictorError, Result};
pub use features::{ColumnMeans, ColumnOrder};
pub use models::loader::ArtifactLoader;
pub use models::predictor::LedPredictor;
pub use scaler::StandardScaler;
