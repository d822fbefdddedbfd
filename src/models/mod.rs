//! Model loading and inference components

pub mod classifier;
pub mod loader;
pub mod predictor;

pub use classifier::{Classifier, OnnxClassifier};
pub use loader::ArtifactLoader;
pub use predictor::LedPredictor;
