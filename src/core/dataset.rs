use crate::error::ExportError;
use ndarray::{ArrayView1, ArrayView2};
use std::fmt;

/// Read-only view over the training rows a tree is flattened against.
#[derive(Clone, Copy)]
pub struct Dataset<'a> {
    features: ArrayView2<'a, f64>,
    labels: ArrayView1<'a, f64>,
}

impl<'a> Dataset<'a> {
    pub fn new(
        features: ArrayView2<'a, f64>,
        labels: ArrayView1<'a, f64>,
    ) -> Result<Self, ExportError> {
        if features.nrows() != labels.len() {
            return Err(ExportError::ShapeMismatch {
                feature_rows: features.nrows(),
                label_rows: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }

    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn features(&self) -> ArrayView2<'a, f64> {
        self.features
    }

    pub fn labels(&self) -> ArrayView1<'a, f64> {
        self.labels
    }

    /// Value of `feature` at `row`. Callers keep both indices in range.
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.features[[row, feature]]
    }

    pub fn label(&self, row: usize) -> f64 {
        self.labels[row]
    }

    pub fn all_rows(&self) -> Vec<usize> {
        (0..self.n_rows()).collect()
    }
}

impl fmt::Debug for Dataset<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("n_rows", &self.n_rows())
            .field("n_features", &self.n_features())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    #[test]
    fn test_new_rejects_row_mismatch() {
        let x = array![[0.0, 1.0], [2.0, 3.0]];
        let y = Array1::from(vec![0.0, 1.0, 1.0]);

        let err = Dataset::new(x.view(), y.view()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::ShapeMismatch {
                feature_rows: 2,
                label_rows: 3
            }
        ));
    }

    #[test]
    fn test_accessors_read_through_views() {
        let x = array![[0.1, 5.0], [0.9, 6.0], [0.3, 7.0]];
        let y = array![0.0, 1.0, 0.0];
        let data = Dataset::new(x.view(), y.view()).unwrap();

        assert_eq!(data.n_rows(), 3);
        assert_eq!(data.n_features(), 2);
        assert_eq!(data.value(1, 1), 6.0);
        assert_eq!(data.label(1), 1.0);
        assert_eq!(data.all_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let x = ndarray::Array2::<f64>::zeros((0, 3));
        let y = Array1::<f64>::zeros(0);
        let data = Dataset::new(x.view(), y.view()).unwrap();

        assert_eq!(data.n_rows(), 0);
        assert_eq!(data.n_features(), 3);
        assert!(data.all_rows().is_empty());
    }
}
