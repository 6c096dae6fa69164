// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{GazeTarget, GAZE_TARGET_COUNT};

/// Raw outputs of the three VFOA models for one turn.
///
/// Positions in `duration_shares` and `directions` are gaze target indices
/// (see [`GazeTarget`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// Predicted number of gaze turns within the utterance.
    pub turn_count: f64,
    /// Unnormalized share of the utterance spent on each target.
    pub duration_shares: [f64; GAZE_TARGET_COUNT],
    /// Binary direction flags; `1.0` marks a predicted gaze recipient.
    pub directions: [f64; GAZE_TARGET_COUNT],
}

impl RawPrediction {
    pub fn new(
        turn_count: f64,
        duration_shares: [f64; GAZE_TARGET_COUNT],
        directions: [f64; GAZE_TARGET_COUNT],
    ) -> Self {
        Self {
            turn_count,
            duration_shares,
            directions,
        }
    }

    /// Targets whose direction flag equals exactly `1.0`, in index order.
    pub fn active_targets(&self) -> Vec<GazeTarget> {
        GazeTarget::ALL
            .iter()
            .copied()
            .filter(|target| self.directions[target.index()] == 1.0)
            .collect()
    }

    pub fn share(&self, target: GazeTarget) -> f64 {
        self.duration_shares[target.index()]
    }

    /// Turn count rounded to the nearest whole turn.
    pub fn rounded_turn_count(&self) -> i64 {
        self.turn_count.round() as i64
    }
}
