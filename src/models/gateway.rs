//! Model gateway: classifier inference over scaled features.
//!
//! Scales the feature vector with the bundle's paired scaler, runs the ONNX
//! classifier, and extracts a fraud probability and label. Every failure on
//! this path is reported as [`InferenceFailure`]; substituting a fallback
//! score is the decision engine's call, not the gateway's.

use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, Tensor};
use tracing::debug;

use crate::error::InferenceFailure;
use crate::features::FeatureVector;
use crate::models::loader::ModelBundle;
use crate::types::decision::Score;

/// Label threshold applied when the classifier graph exports no label output.
const LABEL_THRESHOLD: f64 = 0.5;

impl ModelBundle {
    /// Score a feature vector with the loaded classifier.
    ///
    /// Stateless across calls: the bundle is read-only and the same input
    /// always produces the same output.
    pub fn score(&self, features: &FeatureVector) -> Result<Score, InferenceFailure> {
        let scaled = self.scaler.transform(features)?;

        let shape = vec![1_i64, scaled.len() as i64];
        let input_tensor = Tensor::from_array((shape, scaled))
            .map_err(|e| InferenceFailure::Inference(format!("input tensor: {e}")))?;

        let mut session = self
            .classifier
            .session
            .write()
            .map_err(|e| InferenceFailure::Inference(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs![&self.classifier.input_name => input_tensor])
            .map_err(|e| InferenceFailure::Inference(e.to_string()))?;

        let probability = extract_probability(&outputs, &self.classifier.prob_output)?;
        let is_fraud = extract_label(&outputs, self.classifier.label_output.as_deref())
            .unwrap_or(probability >= LABEL_THRESHOLD);

        debug!(probability, is_fraud, "classifier inference complete");

        Ok(Score {
            probability: probability.clamp(0.0, 1.0),
            is_fraud,
        })
    }
}

/// Extract the fraud-class probability from classifier outputs.
///
/// Handles both tensor outputs and the seq(map(int64, float)) format some
/// classifier exporters emit for probabilities.
fn extract_probability(
    outputs: &ort::session::SessionOutputs,
    prob_output: &str,
) -> Result<f64, InferenceFailure> {
    if let Some(output) = outputs.get(prob_output) {
        if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
            return fraud_prob_from_tensor(&shape, data).ok_or(InferenceFailure::MissingProbability);
        }
        if DynSequenceValueType::can_downcast(&output.dtype()) {
            if let Ok(prob) = extract_from_sequence_map(output) {
                return Ok(prob);
            }
        }
    }

    // The named output was missing or unreadable; try the remaining outputs
    // before giving up, skipping the label.
    for (name, output) in outputs.iter() {
        if name.contains("label") {
            continue;
        }
        if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
            if let Some(prob) = fraud_prob_from_tensor(&shape, data) {
                debug!(output = %name, prob, "probability extracted from fallback output");
                return Ok(prob);
            }
        }
        if DynSequenceValueType::can_downcast(&output.dtype()) {
            if let Ok(prob) = extract_from_sequence_map(&output) {
                return Ok(prob);
            }
        }
    }

    Err(InferenceFailure::MissingProbability)
}

/// Extract the probability for class 1 from a seq(map(int64, float)) output.
fn extract_from_sequence_map(output: &ort::value::DynValue) -> Result<f64, InferenceFailure> {
    let allocator = Allocator::default();

    let sequence = output
        .downcast_ref::<DynSequenceValueType>()
        .map_err(|e| InferenceFailure::Inference(format!("sequence downcast: {e}")))?;

    let maps = sequence
        .try_extract_sequence::<DynMapValueType>(&allocator)
        .map_err(|e| InferenceFailure::Inference(format!("sequence extract: {e}")))?;

    let map_value = maps.first().ok_or(InferenceFailure::MissingProbability)?;

    let kv_pairs = map_value
        .try_extract_key_values::<i64, f32>()
        .map_err(|e| InferenceFailure::Inference(format!("map extract: {e}")))?;

    for (class_id, prob) in &kv_pairs {
        if *class_id == 1 {
            return Ok(*prob as f64);
        }
    }
    // No explicit fraud class; invert the non-fraud probability if present.
    for (class_id, prob) in &kv_pairs {
        if *class_id == 0 {
            return Ok(1.0 - *prob as f64);
        }
    }

    Err(InferenceFailure::MissingProbability)
}

/// Pick the fraud-class probability out of a probability tensor.
///
/// `[batch, 2]` and `[2]` carry per-class probabilities with fraud at index 1;
/// `[batch, 1]` and `[1]` carry a single fraud probability.
fn fraud_prob_from_tensor(shape: &ort::tensor::Shape, data: &[f32]) -> Option<f64> {
    let dims: Vec<i64> = shape.iter().copied().collect();

    let num_classes = match dims.as_slice() {
        [_, n] => *n as usize,
        [n] => *n as usize,
        _ => return None,
    };

    match num_classes {
        0 => None,
        1 => data.first().map(|&v| v as f64),
        _ => data.get(1).map(|&v| v as f64),
    }
}

/// Read the predicted label from the classifier's label output, when exported.
fn extract_label(outputs: &ort::session::SessionOutputs, label_output: Option<&str>) -> Option<bool> {
    let output = outputs.get(label_output?)?;
    let (_, data) = output.try_extract_tensor::<i64>().ok()?;
    data.first().map(|&label| label == 1)
}
