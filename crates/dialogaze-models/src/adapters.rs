// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pipeline-facing adapters over the capability traits.
//!
//! The adapters add no logic of their own. They check the feature vector
//! length, forward it, and read the outputs by position.

use std::path::Path;

use dialogaze_encoding::PipelineKind;
use dialogaze_structures::{FeatureVector, RawPrediction, GAZE_TARGET_COUNT};
use tracing::trace;

use crate::{load_model, Classifier, ModelKind, ModelLoadError, PredictionError, Predictor};

fn check_input(pipeline: PipelineKind, input: &FeatureVector) -> Result<(), PredictionError> {
    let expected = pipeline.vector_len();
    if input.len() != expected {
        return Err(PredictionError::InputLength {
            expected,
            actual: input.len(),
        });
    }
    Ok(())
}

fn incompatible(path: &Path, role: &'static str, reason: String) -> ModelLoadError {
    ModelLoadError::Incompatible {
        path: path.to_path_buf(),
        role,
        reason,
    }
}

fn check_input_len(
    path: &Path,
    role: &'static str,
    model: &ModelKind,
    pipeline: PipelineKind,
) -> Result<(), ModelLoadError> {
    if model.input_len() != pipeline.vector_len() {
        return Err(incompatible(
            path,
            role,
            format!(
                "expects {} inputs but the {} vector has {}",
                model.input_len(),
                pipeline,
                pipeline.vector_len()
            ),
        ));
    }
    Ok(())
}

/// Predicts the addressee label of a turn.
pub struct AddresseePredictor {
    model: Box<dyn Classifier>,
}

impl AddresseePredictor {
    pub fn new(model: Box<dyn Classifier>) -> Self {
        Self { model }
    }

    /// Loads a classifier artifact taking the 74-slot addressee vector.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let artifact = load_model(path)?;
        check_input_len(path, "addressee classifier", &artifact.model, PipelineKind::Addressee)?;
        match artifact.model {
            ModelKind::Classifier(classifier) => Ok(Self::new(Box::new(classifier))),
            other => Err(incompatible(
                path,
                "addressee classifier",
                format!("artifact holds a {}", other.kind_name()),
            )),
        }
    }

    pub fn predict(&self, input: &FeatureVector) -> Result<String, PredictionError> {
        check_input(PipelineKind::Addressee, input)?;
        self.model.classify(input)
    }
}

/// Runs the three VFOA models over one vector.
///
/// Positional contract:
/// - turn-count model: output 0 is the count, extra outputs are ignored;
/// - duration-share model: exactly 6 outputs in gaze-target order;
/// - direction model: exactly 6 binary outputs in gaze-target order.
pub struct VfoaPredictor {
    turn_count: Box<dyn Predictor>,
    duration_share: Box<dyn Predictor>,
    direction: Box<dyn Predictor>,
}

impl VfoaPredictor {
    pub fn new(
        turn_count: Box<dyn Predictor>,
        duration_share: Box<dyn Predictor>,
        direction: Box<dyn Predictor>,
    ) -> Self {
        Self {
            turn_count,
            duration_share,
            direction,
        }
    }

    pub fn load<P: AsRef<Path>>(
        turn_count_path: P,
        duration_share_path: P,
        direction_path: P,
    ) -> Result<Self, ModelLoadError> {
        let turn_count = load_regressor(turn_count_path.as_ref(), "VFOA turn-count model", None)?;
        let duration_share = load_regressor(
            duration_share_path.as_ref(),
            "VFOA duration-share model",
            Some(GAZE_TARGET_COUNT),
        )?;

        let path = direction_path.as_ref();
        let role = "VFOA direction model";
        let artifact = load_model(path)?;
        check_input_len(path, role, &artifact.model, PipelineKind::Vfoa)?;
        if artifact.model.output_len() != GAZE_TARGET_COUNT {
            return Err(incompatible(
                path,
                role,
                format!(
                    "has {} outputs, expected {}",
                    artifact.model.output_len(),
                    GAZE_TARGET_COUNT
                ),
            ));
        }
        let direction: Box<dyn Predictor> = match artifact.model {
            ModelKind::MultiLabel(model) => Box::new(model),
            other => {
                return Err(incompatible(
                    path,
                    role,
                    format!("artifact holds a {}", other.kind_name()),
                ))
            }
        };

        Ok(Self::new(turn_count, duration_share, direction))
    }

    pub fn predict(&self, input: &FeatureVector) -> Result<RawPrediction, PredictionError> {
        check_input(PipelineKind::Vfoa, input)?;

        let turns = self.turn_count.predict(input)?;
        let turn_count = *turns.first().ok_or(PredictionError::OutputShape {
            model: "turn-count",
            expected: 1,
            actual: 0,
        })?;
        let duration_shares =
            target_outputs("duration-share", self.duration_share.predict(input)?)?;
        let directions = target_outputs("direction", self.direction.predict(input)?)?;

        trace!(
            "[VFOA] raw prediction: turns={:.3} shares={:?} directions={:?}",
            turn_count,
            duration_shares,
            directions
        );
        Ok(RawPrediction::new(turn_count, duration_shares, directions))
    }
}

fn target_outputs(
    model: &'static str,
    outputs: Vec<f64>,
) -> Result<[f64; GAZE_TARGET_COUNT], PredictionError> {
    let actual = outputs.len();
    outputs.try_into().map_err(|_| PredictionError::OutputShape {
        model,
        expected: GAZE_TARGET_COUNT,
        actual,
    })
}

fn load_regressor(
    path: &Path,
    role: &'static str,
    outputs: Option<usize>,
) -> Result<Box<dyn Predictor>, ModelLoadError> {
    let artifact = load_model(path)?;
    check_input_len(path, role, &artifact.model, PipelineKind::Vfoa)?;
    if let Some(expected) = outputs {
        if artifact.model.output_len() != expected {
            return Err(incompatible(
                path,
                role,
                format!(
                    "has {} outputs, expected {}",
                    artifact.model.output_len(),
                    expected
                ),
            ));
        }
    }
    match artifact.model {
        ModelKind::Regressor(model) => Ok(Box::new(model)),
        other => Err(incompatible(
            path,
            role,
            format!("artifact holds a {}", other.kind_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<f64>);

    impl Predictor for Fixed {
        fn predict(&self, _input: &FeatureVector) -> Result<Vec<f64>, PredictionError> {
            Ok(self.0.clone())
        }
    }

    struct Label(&'static str);

    impl Classifier for Label {
        fn classify(&self, _input: &FeatureVector) -> Result<String, PredictionError> {
            Ok(self.0.to_string())
        }
    }

    fn vfoa(turns: Vec<f64>, shares: Vec<f64>, directions: Vec<f64>) -> VfoaPredictor {
        VfoaPredictor::new(
            Box::new(Fixed(turns)),
            Box::new(Fixed(shares)),
            Box::new(Fixed(directions)),
        )
    }

    #[test]
    fn test_vfoa_reads_outputs_by_position() {
        let predictor = vfoa(
            vec![2.6, 99.0],
            vec![0.0, 0.6, 0.0, 0.4, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
        );
        let raw = predictor.predict(&FeatureVector::zeros(32)).unwrap();
        assert_eq!(raw.turn_count, 2.6);
        assert_eq!(raw.duration_shares, [0.0, 0.6, 0.0, 0.4, 0.0, 0.0]);
        assert_eq!(raw.directions, [0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_vfoa_rejects_short_share_output() {
        let predictor = vfoa(vec![1.0], vec![0.5; 5], vec![1.0; 6]);
        let err = predictor.predict(&FeatureVector::zeros(32)).unwrap_err();
        assert_eq!(
            err,
            PredictionError::OutputShape {
                model: "duration-share",
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_vfoa_rejects_empty_turn_count() {
        let predictor = vfoa(vec![], vec![0.0; 6], vec![0.0; 6]);
        let err = predictor.predict(&FeatureVector::zeros(32)).unwrap_err();
        assert!(matches!(err, PredictionError::OutputShape { model: "turn-count", .. }));
    }

    #[test]
    fn test_input_length_checked_before_model_call() {
        let predictor = AddresseePredictor::new(Box::new(Label("me")));
        assert_eq!(
            predictor.predict(&FeatureVector::zeros(32)).unwrap_err(),
            PredictionError::InputLength {
                expected: 74,
                actual: 32
            }
        );
        assert_eq!(predictor.predict(&FeatureVector::zeros(74)).unwrap(), "me");
    }
}
