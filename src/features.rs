//! Feature vector assembly for LED control inference.
//!
//! A prediction request carries only the sensor readings that happen to be
//! available; the remaining features are backfilled from the column-mean
//! defaults computed at training time. The merged mapping is then projected
//! into the exact positional layout the scaler and model were fitted on.

use crate::error::{PredictorError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Canonical positional sequence of feature names.
///
/// Defines the arity and layout of every vector handed to the scaler and
/// model. Loaded once from `column_order.json` and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ColumnOrder(Vec<String>);

impl ColumnOrder {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Number of features the model expects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Feature names in canonical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

/// Per-feature default values from the training data.
///
/// Loaded once from `column_means.json`; used to backfill features absent
/// from a prediction request. Never mutated after load.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ColumnMeans(HashMap<String, f64>);

impl ColumnMeans {
    pub fn new(means: HashMap<String, f64>) -> Self {
        Self(means)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Merge a partial sensor reading over the column-mean defaults and project
/// the result into canonical order.
///
/// For every feature in `order`: the caller's value wins when present,
/// otherwise the column mean fills in. The output length always equals
/// `order.len()`. Keys in `partial` that are not part of the column order
/// are accepted and ignored.
pub fn merge_features(
    means: &ColumnMeans,
    order: &ColumnOrder,
    partial: &HashMap<String, f64>,
) -> Result<Vec<f64>> {
    let unknown = partial.keys().filter(|k| !order.contains(k)).count();
    if unknown > 0 {
        debug!(unknown_keys = unknown, "ignoring features outside column order");
    }

    order
        .names()
        .map(|name| {
            partial
                .get(name)
                .copied()
                .or_else(|| means.get(name))
                .ok_or_else(|| PredictorError::IncompleteFeatureVector {
                    feature: name.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ColumnMeans, ColumnOrder) {
        let mut means = HashMap::new();
        means.insert("Light_Intensity".to_string(), 420.0);
        means.insert("Temperature".to_string(), 24.0);
        means.insert("Humidity".to_string(), 70.0);
        means.insert("Minute_Of_Day".to_string(), 720.0);

        let order = ColumnOrder::new(vec![
            "Light_Intensity".to_string(),
            "Temperature".to_string(),
            "Humidity".to_string(),
            "Minute_Of_Day".to_string(),
        ]);

        (ColumnMeans::new(means), order)
    }

    #[test]
    fn test_full_input_overrides_every_default() {
        let (means, order) = fixture();

        let mut partial = HashMap::new();
        partial.insert("Light_Intensity".to_string(), 500.0);
        partial.insert("Temperature".to_string(), 21.5);
        partial.insert("Humidity".to_string(), 67.0);
        partial.insert("Minute_Of_Day".to_string(), 510.0);

        let merged = merge_features(&means, &order, &partial).unwrap();
        assert_eq!(merged, vec![500.0, 21.5, 67.0, 510.0]);
    }

    #[test]
    fn test_omitted_features_fall_back_to_means() {
        let (means, order) = fixture();

        let mut partial = HashMap::new();
        partial.insert("Temperature".to_string(), 18.0);

        let merged = merge_features(&means, &order, &partial).unwrap();
        assert_eq!(merged, vec![420.0, 18.0, 70.0, 720.0]);
    }

    #[test]
    fn test_empty_input_is_all_defaults() {
        let (means, order) = fixture();

        let merged = merge_features(&means, &order, &HashMap::new()).unwrap();
        assert_eq!(merged, vec![420.0, 24.0, 70.0, 720.0]);
    }

    #[test]
    fn test_projection_length_matches_order() {
        let (means, order) = fixture();

        for subset in [vec![], vec!["Humidity"], vec!["Humidity", "Temperature"]] {
            let partial: HashMap<String, f64> =
                subset.iter().map(|k| (k.to_string(), 1.0)).collect();
            let merged = merge_features(&means, &order, &partial).unwrap();
            assert_eq!(merged.len(), order.len());
        }
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (means, order) = fixture();

        let mut partial = HashMap::new();
        partial.insert("Temperature".to_string(), 18.0);
        partial.insert("Wind_Speed".to_string(), 99.0);

        let merged = merge_features(&means, &order, &partial).unwrap();
        assert_eq!(merged, vec![420.0, 18.0, 70.0, 720.0]);
    }

    #[test]
    fn test_feature_without_default_or_value_fails() {
        let (means, _) = fixture();
        let order = ColumnOrder::new(vec![
            "Light_Intensity".to_string(),
            "Soil_Moisture".to_string(),
        ]);

        let err = merge_features(&means, &order, &HashMap::new()).unwrap_err();
        match err {
            PredictorError::IncompleteFeatureVector { feature } => {
                assert_eq!(feature, "Soil_Moisture");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_merge_does_not_mutate_defaults() {
        let (means, order) = fixture();

        let mut partial = HashMap::new();
        partial.insert("Humidity".to_string(), 1.0);
        let _ = merge_features(&means, &order, &partial).unwrap();

        // A later call without Humidity must still see the original mean.
        let merged = merge_features(&means, &order, &HashMap::new()).unwrap();
        assert_eq!(merged[2], 70.0);
    }
}
