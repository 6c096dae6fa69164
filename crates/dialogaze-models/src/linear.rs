// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Linear model backends.

use serde::{Deserialize, Serialize};

use crate::{PredictionError, ShapeError};

/// Dense affine map: output row `r` is `dot(weights[r], x) + bias[r]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearLayer {
    input_len: usize,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl LinearLayer {
    pub fn new(
        input_len: usize,
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
    ) -> Result<Self, ShapeError> {
        let layer = Self {
            input_len,
            weights,
            bias,
        };
        layer.validate()?;
        Ok(layer)
    }

    /// Re-checks dimensions. Deserialized layers bypass [`new`](Self::new).
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.input_len == 0 {
            return Err(ShapeError::ZeroInput);
        }
        if self.weights.is_empty() {
            return Err(ShapeError::Empty);
        }
        for (row, weights) in self.weights.iter().enumerate() {
            if weights.len() != self.input_len {
                return Err(ShapeError::RowLength {
                    row,
                    expected: self.input_len,
                    actual: weights.len(),
                });
            }
        }
        if self.bias.len() != self.weights.len() {
            return Err(ShapeError::CountMismatch {
                what: "bias",
                expected: self.weights.len(),
                actual: self.bias.len(),
            });
        }
        Ok(())
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn output_len(&self) -> usize {
        self.weights.len()
    }

    pub fn scores(&self, input: &[f64]) -> Result<Vec<f64>, PredictionError> {
        if input.len() != self.input_len {
            return Err(PredictionError::InputLength {
                expected: self.input_len,
                actual: input.len(),
            });
        }
        Ok(self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + bias)
            .collect())
    }
}

/// Multi-output regressor, one output per layer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    layer: LinearLayer,
}

impl LinearRegressor {
    pub fn new(layer: LinearLayer) -> Self {
        Self { layer }
    }

    pub fn layer(&self) -> &LinearLayer {
        &self.layer
    }

    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, PredictionError> {
        self.layer.scores(input)
    }
}

/// One-vs-rest classifier. Predicts the label whose row scores highest;
/// ties go to the lowest index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    labels: Vec<String>,
    layer: LinearLayer,
}

impl LinearClassifier {
    pub fn new(labels: Vec<String>, layer: LinearLayer) -> Result<Self, ShapeError> {
        let classifier = Self { labels, layer };
        classifier.validate()?;
        Ok(classifier)
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        self.layer.validate()?;
        if self.labels.len() != self.layer.output_len() {
            return Err(ShapeError::CountMismatch {
                what: "labels",
                expected: self.layer.output_len(),
                actual: self.labels.len(),
            });
        }
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn layer(&self) -> &LinearLayer {
        &self.layer
    }

    pub fn classify(&self, input: &[f64]) -> Result<&str, PredictionError> {
        let scores = self.layer.scores(input)?;
        let mut best: Option<(usize, f64)> = None;
        for (index, score) in scores.into_iter().enumerate() {
            if !score.is_finite() {
                return Err(PredictionError::NonFinite {
                    model: "classifier",
                    index,
                });
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((index, score)),
            }
        }
        // validate() guarantees at least one row
        let (index, _) = best.ok_or(PredictionError::OutputShape {
            model: "classifier",
            expected: self.labels.len(),
            actual: 0,
        })?;
        Ok(&self.labels[index])
    }
}

/// Independent binary decision per row: `1.0` when the score is above
/// `threshold`, else `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearMultiLabel {
    layer: LinearLayer,
    threshold: f64,
}

impl LinearMultiLabel {
    pub fn new(layer: LinearLayer, threshold: f64) -> Result<Self, ShapeError> {
        let model = Self { layer, threshold };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        self.layer.validate()?;
        if !self.threshold.is_finite() {
            return Err(ShapeError::NonFiniteThreshold(self.threshold));
        }
        Ok(())
    }

    pub fn layer(&self) -> &LinearLayer {
        &self.layer
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, PredictionError> {
        Ok(self
            .layer
            .scores(input)?
            .into_iter()
            .map(|score| if score > self.threshold { 1.0 } else { 0.0 })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> LinearLayer {
        let weights = (0..n)
            .map(|r| (0..n).map(|c| if r == c { 1.0 } else { 0.0 }).collect())
            .collect();
        LinearLayer::new(n, weights, vec![0.0; n]).unwrap()
    }

    #[test]
    fn test_layer_scores() {
        let layer =
            LinearLayer::new(2, vec![vec![1.0, 2.0], vec![-1.0, 0.5]], vec![0.5, 0.0]).unwrap();
        assert_eq!(layer.scores(&[2.0, 4.0]).unwrap(), vec![10.5, 0.0]);
    }

    #[test]
    fn test_layer_rejects_ragged_rows() {
        let err =
            LinearLayer::new(3, vec![vec![1.0, 2.0, 3.0], vec![1.0]], vec![0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::RowLength {
                row: 1,
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_layer_rejects_bias_count() {
        let err = LinearLayer::new(1, vec![vec![1.0]], vec![0.0, 1.0]).unwrap_err();
        assert!(matches!(err, ShapeError::CountMismatch { what: "bias", .. }));
    }

    #[test]
    fn test_input_length_checked() {
        let err = identity(3).scores(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            PredictionError::InputLength {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_classifier_argmax_ties_to_lowest_index() {
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let classifier = LinearClassifier::new(labels, identity(3)).unwrap();
        assert_eq!(classifier.classify(&[0.1, 0.9, 0.3]).unwrap(), "b");
        assert_eq!(classifier.classify(&[0.5, 0.5, 0.5]).unwrap(), "a");
        assert_eq!(classifier.classify(&[0.0, 0.7, 0.7]).unwrap(), "b");
    }

    #[test]
    fn test_classifier_rejects_nan_scores() {
        let classifier = LinearClassifier::new(vec!["a".into(), "b".into()], identity(2)).unwrap();
        let err = classifier.classify(&[f64::NAN, 1.0]).unwrap_err();
        assert_eq!(
            err,
            PredictionError::NonFinite {
                model: "classifier",
                index: 0
            }
        );
    }

    #[test]
    fn test_classifier_label_count_must_match_rows() {
        let err = LinearClassifier::new(vec!["a".into()], identity(2)).unwrap_err();
        assert!(matches!(err, ShapeError::CountMismatch { what: "labels", .. }));
    }

    #[test]
    fn test_multilabel_threshold_is_strict() {
        let model = LinearMultiLabel::new(identity(3), 0.5).unwrap();
        assert_eq!(model.predict(&[0.5, 0.51, -1.0]).unwrap(), vec![0.0, 1.0, 0.0]);
    }
}
