// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::StructureError;

/// Number of candidate gaze targets a VFOA model predicts over.
pub const GAZE_TARGET_COUNT: usize = 6;

/// A candidate gaze target. Discriminants are the models' output indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GazeTarget {
    Pm = 0,
    Me = 1,
    Ui = 2,
    Id = 3,
    Object = 4,
    Others = 5,
}

impl GazeTarget {
    /// Every target, in output-index order.
    pub const ALL: [GazeTarget; GAZE_TARGET_COUNT] = [
        GazeTarget::Pm,
        GazeTarget::Me,
        GazeTarget::Ui,
        GazeTarget::Id,
        GazeTarget::Object,
        GazeTarget::Others,
    ];

    pub fn from_index(index: usize) -> Result<Self, StructureError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(StructureError::InvalidTargetIndex(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Label used in the published gaze schedule.
    pub fn label(self) -> &'static str {
        match self {
            GazeTarget::Pm => "PM",
            GazeTarget::Me => "ME",
            GazeTarget::Ui => "UI",
            GazeTarget::Id => "ID",
            GazeTarget::Object => "Object",
            GazeTarget::Others => "Others",
        }
    }

    /// Maps a participant role label (`pm`, `me`, `ui`, `id`) to its target.
    ///
    /// Matching ignores ASCII case. Labels that do not name a single
    /// participant, such as `group`, map to `None`.
    pub fn from_role(role: &str) -> Option<Self> {
        match role.to_ascii_lowercase().as_str() {
            "pm" => Some(GazeTarget::Pm),
            "me" => Some(GazeTarget::Me),
            "ui" => Some(GazeTarget::Ui),
            "id" => Some(GazeTarget::Id),
            _ => None,
        }
    }
}

impl Display for GazeTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GazeTarget {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|target| target.label() == s)
            .ok_or_else(|| StructureError::InvalidTargetLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order_matches_model_outputs() {
        let labels: Vec<&str> = GazeTarget::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["PM", "ME", "UI", "ID", "Object", "Others"]);
        for (i, target) in GazeTarget::ALL.iter().enumerate() {
            assert_eq!(target.index(), i);
            assert_eq!(GazeTarget::from_index(i).unwrap(), *target);
        }
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(
            GazeTarget::from_index(6),
            Err(StructureError::InvalidTargetIndex(6))
        );
    }

    #[test]
    fn test_from_role() {
        assert_eq!(GazeTarget::from_role("me"), Some(GazeTarget::Me));
        assert_eq!(GazeTarget::from_role("PM"), Some(GazeTarget::Pm));
        assert_eq!(GazeTarget::from_role("group"), None);
        assert_eq!(GazeTarget::from_role("object"), None);
    }

    #[test]
    fn test_label_parse() {
        assert_eq!("Others".parse::<GazeTarget>().unwrap(), GazeTarget::Others);
        assert!("others".parse::<GazeTarget>().is_err());
    }
}
