// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Capability traits the pipelines depend on.
//!
//! Implementations must be pre-loaded; a call never touches the filesystem.
//! Both traits require `Send` so a loaded model can be moved into the thread
//! that runs the polling loop.

use dialogaze_structures::FeatureVector;

use crate::{LinearClassifier, LinearMultiLabel, LinearRegressor, PredictionError};

/// A model returning a numeric output array. The meaning of each output index
/// is fixed by the caller's positional contract.
pub trait Predictor: Send {
    fn predict(&self, input: &FeatureVector) -> Result<Vec<f64>, PredictionError>;
}

/// A model returning a single class label.
pub trait Classifier: Send {
    fn classify(&self, input: &FeatureVector) -> Result<String, PredictionError>;
}

impl Predictor for LinearRegressor {
    fn predict(&self, input: &FeatureVector) -> Result<Vec<f64>, PredictionError> {
        LinearRegressor::predict(self, input.as_slice())
    }
}

impl Predictor for LinearMultiLabel {
    fn predict(&self, input: &FeatureVector) -> Result<Vec<f64>, PredictionError> {
        LinearMultiLabel::predict(self, input.as_slice())
    }
}

impl Classifier for LinearClassifier {
    fn classify(&self, input: &FeatureVector) -> Result<String, PredictionError> {
        LinearClassifier::classify(self, input.as_slice()).map(str::to_string)
    }
}

impl<T: Predictor + ?Sized> Predictor for Box<T> {
    fn predict(&self, input: &FeatureVector) -> Result<Vec<f64>, PredictionError> {
        (**self).predict(input)
    }
}

impl<T: Classifier + ?Sized> Classifier for Box<T> {
    fn classify(&self, input: &FeatureVector) -> Result<String, PredictionError> {
        (**self).classify(input)
    }
}
