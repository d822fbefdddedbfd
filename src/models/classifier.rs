//! Classifier seam between the predictor and the ONNX model.
//!
//! The model is an opaque artifact; everything the predictor needs from it
//! is a class decision for one scaled vector. The trait keeps the label
//! mapping and merge logic testable without a real ONNX session.

use crate::error::Result;
use crate::models::loader::LoadedModel;
use ort::value::Tensor;
use tracing::debug;

/// A trained binary classifier over scaled feature vectors
pub trait Classifier: Send {
    /// Predict the class (0 or 1) for a single scaled vector
    fn predict(&mut self, scaled: &[f32]) -> Result<u8>;
}

/// Classifier backed by an ONNX Runtime session
pub struct OnnxClassifier {
    model: LoadedModel,
}

impl OnnxClassifier {
    pub fn new(model: LoadedModel) -> Self {
        Self { model }
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&mut self, scaled: &[f32]) -> Result<u8> {
        // Single-row input, shape [1, num_features]
        let shape = vec![1_i64, scaled.len() as i64];
        let input_tensor = Tensor::from_array((shape, scaled.to_vec()))?;

        let outputs = self
            .model
            .session
            .run(ort::inputs![&self.model.input_name => input_tensor])?;

        // Preferred path: the int64 label output of sklearn-onnx exports.
        if let Some(name) = &self.model.label_output {
            if let Some(output) = outputs.get(name) {
                if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                    if let Some(&label) = data.first() {
                        debug!(label, "Class taken from label output");
                        return Ok(u8::from(label == 1));
                    }
                }
            }
        }

        // Fallback: argmax over the probabilities output.
        if let Some(name) = &self.model.prob_output {
            if let Some(output) = outputs.get(name) {
                if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                    let label = match data {
                        [p] => u8::from(*p >= 0.5),
                        [p0, p1, ..] => u8::from(p1 >= p0),
                        [] => 0,
                    };
                    debug!(label, "Class taken from probabilities output");
                    return Ok(label);
                }
            }
        }

        // Last resort: scan every output for something extractable.
        for (name, output) in outputs.iter() {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    debug!(output = %name, label, "Class taken from fallback output");
                    return Ok(u8::from(label == 1));
                }
            }
        }

        Err(ort::Error::new("no usable class output in model").into())
    }
}
