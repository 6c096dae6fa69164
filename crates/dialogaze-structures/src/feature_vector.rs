// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::StructureError;

/// Fixed-length numeric feature vector addressed by integer offset.
///
/// The length is chosen once at construction and never changes; every write
/// is bounds-checked against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Creates a zero-filled vector of `len` slots.
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, offset: usize) -> Option<f64> {
        self.values.get(offset).copied()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }

    /// Writes a single value at `offset`.
    pub fn set(&mut self, offset: usize, value: f64) -> Result<(), StructureError> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(offset)
            .ok_or(StructureError::OutOfBounds {
                offset,
                end: offset + 1,
                len,
            })?;
        *slot = value;
        Ok(())
    }

    /// Copies `values` into the slot range starting at `offset`.
    pub fn copy_into(&mut self, offset: usize, values: &[f64]) -> Result<(), StructureError> {
        let end = offset + values.len();
        let len = self.values.len();
        let target = self
            .values
            .get_mut(offset..end)
            .ok_or(StructureError::OutOfBounds { offset, end, len })?;
        target.copy_from_slice(values);
        Ok(())
    }

    /// Offsets of every slot holding a non-zero value.
    pub fn nonzero_offsets(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, offset: usize) -> &f64 {
        &self.values[offset]
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_has_fixed_length() {
        let v = FeatureVector::zeros(32);
        assert_eq!(v.len(), 32);
        assert!(v.nonzero_offsets().is_empty());
    }

    #[test]
    fn test_set_and_index() {
        let mut v = FeatureVector::zeros(4);
        v.set(2, 1.5).unwrap();
        assert_eq!(v[2], 1.5);
        assert_eq!(v.get(2), Some(1.5));
        assert_eq!(v.nonzero_offsets(), vec![2]);
    }

    #[test]
    fn test_set_out_of_bounds_leaves_vector_untouched() {
        let mut v = FeatureVector::zeros(4);
        let err = v.set(4, 1.0).unwrap_err();
        assert_eq!(
            err,
            StructureError::OutOfBounds {
                offset: 4,
                end: 5,
                len: 4
            }
        );
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn test_copy_into_range() {
        let mut v = FeatureVector::zeros(6);
        v.copy_into(1, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v.as_slice(), &[0.0, 1.0, 2.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_copy_into_rejects_overflow_without_growing() {
        let mut v = FeatureVector::zeros(4);
        assert!(v.copy_into(2, &[1.0, 1.0, 1.0]).is_err());
        assert_eq!(v.len(), 4);
        assert!(v.nonzero_offsets().is_empty());
    }
}
