// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use dialogaze_structures::{GazeTarget, RawPrediction};
use tracing::debug;

use crate::{GazeAllocation, SchedulerError};

/// Normalized shares at or below this fraction of the turn are dropped.
pub const DEFAULT_SHARE_THRESHOLD: f64 = 0.05;

/// Roles of the current and previous turn, plus the turn's length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnContext<'a> {
    pub total_duration_ms: f64,
    pub speaker: &'a str,
    pub addressee: &'a str,
    pub prev_speaker: &'a str,
    pub prev_addressee: &'a str,
}

impl TurnContext<'_> {
    /// True when both roles repeat from the previous turn.
    pub fn roles_repeat(&self) -> bool {
        self.speaker.eq_ignore_ascii_case(self.prev_speaker)
            && self.addressee.eq_ignore_ascii_case(self.prev_addressee)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GazeSchedule {
    /// Rounded turn-count prediction, carried for reporting only.
    pub predicted_turns: i64,
    pub allocation: GazeAllocation,
    /// Target moved to the front by the continuity rule, if any.
    pub promoted: Option<GazeTarget>,
}

impl GazeSchedule {
    /// Published payload for this schedule.
    pub fn serialize(&self) -> String {
        self.allocation.to_string()
    }
}

/// Sanitizes, normalizes and thresholds active-target shares.
///
/// - negative or non-finite shares count as 0;
/// - if every share is 0, each target gets an equal share;
/// - normalized shares `<= threshold` are dropped and the survivors
///   renormalized to sum to 1.
///
/// Input order is kept. The result may be empty when every share falls at or
/// below the threshold.
pub fn normalize_and_threshold(
    shares: &[(GazeTarget, f64)],
    threshold: f64,
) -> Vec<(GazeTarget, f64)> {
    if shares.is_empty() {
        return Vec::new();
    }
    let sanitized: Vec<(GazeTarget, f64)> = shares
        .iter()
        .map(|(target, share)| {
            let share = if share.is_finite() && *share > 0.0 { *share } else { 0.0 };
            (*target, share)
        })
        .collect();

    let sum: f64 = sanitized.iter().map(|(_, share)| share).sum();
    let normalized: Vec<(GazeTarget, f64)> = if sum > 0.0 {
        sanitized
            .into_iter()
            .map(|(target, share)| (target, share / sum))
            .collect()
    } else {
        let equal = 1.0 / sanitized.len() as f64;
        sanitized
            .into_iter()
            .map(|(target, _)| (target, equal))
            .collect()
    };

    let retained: Vec<(GazeTarget, f64)> = normalized
        .into_iter()
        .filter(|(_, share)| *share > threshold)
        .collect();
    let retained_sum: f64 = retained.iter().map(|(_, share)| share).sum();
    retained
        .into_iter()
        .map(|(target, share)| (target, share / retained_sum))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeScheduler {
    threshold: f64,
}

impl Default for GazeScheduler {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SHARE_THRESHOLD,
        }
    }
}

impl GazeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f64) -> Result<Self, SchedulerError> {
        if !(0.0..1.0).contains(&threshold) {
            return Err(SchedulerError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn schedule(&self, prediction: &RawPrediction, context: &TurnContext<'_>) -> GazeSchedule {
        let predicted_turns = prediction.rounded_turn_count();
        let active = prediction.active_targets();

        let mut allocation = match active.as_slice() {
            [] => GazeAllocation::empty(),
            [only] => GazeAllocation::from_entries(vec![(*only, context.total_duration_ms)]),
            _ => {
                let shares: Vec<(GazeTarget, f64)> = active
                    .iter()
                    .map(|target| (*target, prediction.share(*target)))
                    .collect();
                let entries = normalize_and_threshold(&shares, self.threshold)
                    .into_iter()
                    .map(|(target, share)| (target, share * context.total_duration_ms))
                    .collect();
                GazeAllocation::from_entries(entries)
            }
        };

        let promoted = match GazeTarget::from_role(context.prev_addressee) {
            Some(target) if active.len() > 1 && context.roles_repeat() => {
                allocation.promote(target).then_some(target)
            }
            _ => None,
        };

        debug!(
            "[SCHEDULER] active={:?} retained={} promoted={:?} turns={}",
            active,
            allocation.len(),
            promoted,
            predicted_turns
        );

        GazeSchedule {
            predicted_turns,
            allocation,
            promoted,
        }
    }
}
