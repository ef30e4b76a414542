// Leaf sources — datasets built directly from in-memory arrays

use crate::dataset::{Dataset, Sample};

// FeatureDataset — one value matrix, one shared label

/// A dataset over a row-major value matrix where every row carries the same
/// label.
///
/// Useful when building one dataset per class (e.g. extracted feature vectors
/// for a single category) that are then concatenated or filtered.
#[derive(Debug, Clone)]
pub struct FeatureDataset {
    values: Vec<f64>,
    row_shape: Vec<usize>,
    row_len: usize,
    label: i64,
}

impl FeatureDataset {
    /// Create a dataset from `values` interpreted as consecutive rows of
    /// shape `row_shape`, all labeled `label`.
    ///
    /// # Panics
    /// Panics if `row_shape` is empty or has zero elements, or if
    /// `values.len()` is not a multiple of the row size.
    pub fn new(values: Vec<f64>, row_shape: Vec<usize>, label: i64) -> Self {
        let row_len: usize = row_shape.iter().product();
        assert!(
            !row_shape.is_empty() && row_len > 0,
            "FeatureDataset: row shape {:?} has no elements",
            row_shape
        );
        assert_eq!(
            values.len() % row_len,
            0,
            "FeatureDataset: {} values do not divide into rows of {}",
            values.len(),
            row_len
        );
        Self {
            values,
            row_shape,
            row_len,
            label,
        }
    }
}

impl Dataset for FeatureDataset {
    fn len(&self) -> usize {
        self.values.len() / self.row_len
    }

    fn get(&self, index: usize) -> Sample {
        let start = index * self.row_len;
        Sample {
            input: self.values[start..start + self.row_len].to_vec(),
            input_shape: self.row_shape.clone(),
            label: self.label,
        }
    }

    fn labels(&self) -> Option<Vec<i64>> {
        Some(vec![self.label; self.len()])
    }

    fn name(&self) -> &str {
        "features"
    }
}

// CustomDataset — two parallel feature columns plus a label column

/// A dataset assembled from two parallel scalar feature columns and a label
/// column, as produced by tabular preprocessing.
///
/// Each sample's input is the two-element vector `[x1[i], x2[i]]`; labels are
/// truncated from `f64` to integer class indices.
#[derive(Debug, Clone)]
pub struct CustomDataset {
    x1: Vec<f64>,
    x2: Vec<f64>,
    y: Vec<f64>,
}

impl CustomDataset {
    /// # Panics
    /// Panics if the three columns differ in length.
    pub fn new(x1: Vec<f64>, x2: Vec<f64>, y: Vec<f64>) -> Self {
        assert!(
            x1.len() == x2.len() && x1.len() == y.len(),
            "CustomDataset: column lengths differ ({}, {}, {})",
            x1.len(),
            x2.len(),
            y.len()
        );
        Self { x1, x2, y }
    }
}

impl Dataset for CustomDataset {
    fn len(&self) -> usize {
        self.x1.len()
    }

    fn get(&self, index: usize) -> Sample {
        Sample {
            input: vec![self.x1[index], self.x2[index]],
            input_shape: vec![2],
            label: self.y[index] as i64,
        }
    }

    fn labels(&self) -> Option<Vec<i64>> {
        Some(self.y.iter().map(|&v| v as i64).collect())
    }

    fn name(&self) -> &str {
        "custom"
    }
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_dataset_rows_share_label() {
        let ds = FeatureDataset::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], vec![3], 7);
        assert_eq!(ds.len(), 2);
        let s = ds.get(1);
        assert_eq!(s.input, vec![3.0, 4.0, 5.0]);
        assert_eq!(s.input_shape, vec![3]);
        assert_eq!(s.label, 7);
        assert_eq!(ds.labels(), Some(vec![7, 7]));
    }

    #[test]
    fn feature_dataset_multidim_rows() {
        let ds = FeatureDataset::new(vec![0.0; 24], vec![2, 3], 0);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.get(3).input_shape, vec![2, 3]);
    }

    #[test]
    #[should_panic(expected = "do not divide")]
    fn feature_dataset_ragged_values() {
        FeatureDataset::new(vec![0.0; 7], vec![3], 0);
    }

    #[test]
    fn custom_dataset_pairs_and_coercion() {
        let ds = CustomDataset::new(vec![1.0, 2.0], vec![10.0, 20.0], vec![0.0, 1.9]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(0).input, vec![1.0, 10.0]);
        // labels truncate toward zero
        assert_eq!(ds.get(1).label, 1);
        assert_eq!(ds.labels(), Some(vec![0, 1]));
    }

    #[test]
    #[should_panic(expected = "column lengths differ")]
    fn custom_dataset_mismatched_columns() {
        CustomDataset::new(vec![1.0], vec![1.0, 2.0], vec![0.0]);
    }
}
