// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use dialogaze_structures::GazeTarget;

/// Ordered split of a turn's duration (milliseconds) across gaze targets.
///
/// Order is significant: it is the order the published schedule lists
/// targets in. Each target appears at most once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GazeAllocation {
    entries: Vec<(GazeTarget, f64)>,
}

impl GazeAllocation {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: Vec<(GazeTarget, f64)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(GazeTarget, f64)] {
        &self.entries
    }

    pub fn targets(&self) -> Vec<GazeTarget> {
        self.entries.iter().map(|(target, _)| *target).collect()
    }

    pub fn get(&self, target: GazeTarget) -> Option<f64> {
        self.entries
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, duration)| *duration)
    }

    pub fn contains(&self, target: GazeTarget) -> bool {
        self.get(target).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all allocated durations.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, duration)| duration).sum()
    }

    /// Moves `target` to the front, keeping the relative order of the rest.
    /// Returns false if the target is not allocated.
    pub(crate) fn promote(&mut self, target: GazeTarget) -> bool {
        match self.entries.iter().position(|(t, _)| *t == target) {
            Some(index) => {
                let entry = self.entries.remove(index);
                self.entries.insert(0, entry);
                true
            }
            None => false,
        }
    }
}

/// Wire rendering: `LABEL:DURATION , ` per entry, e.g. `ME:600.0 , ID:400.0 , `.
/// Durations use shortest round-trip formatting with a fractional part.
impl Display for GazeAllocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (target, duration) in &self.entries {
            write!(f, "{}:{:?} , ", target.label(), duration)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let allocation = GazeAllocation::from_entries(vec![
            (GazeTarget::Me, 600.0),
            (GazeTarget::Id, 400.0),
        ]);
        assert_eq!(allocation.to_string(), "ME:600.0 , ID:400.0 , ");
    }

    #[test]
    fn test_display_keeps_float_precision() {
        let allocation =
            GazeAllocation::from_entries(vec![(GazeTarget::Others, 333.3333333333333)]);
        assert_eq!(allocation.to_string(), "Others:333.3333333333333 , ");
    }

    #[test]
    fn test_empty_renders_empty_string() {
        assert_eq!(GazeAllocation::empty().to_string(), "");
    }

    #[test]
    fn test_promote_keeps_relative_order() {
        let mut allocation = GazeAllocation::from_entries(vec![
            (GazeTarget::Pm, 1.0),
            (GazeTarget::Ui, 2.0),
            (GazeTarget::Id, 3.0),
        ]);
        assert!(allocation.promote(GazeTarget::Id));
        assert_eq!(
            allocation.targets(),
            vec![GazeTarget::Id, GazeTarget::Pm, GazeTarget::Ui]
        );
        assert!(!allocation.promote(GazeTarget::Me));
        assert_eq!(allocation.total(), 6.0);
    }
}
