use crate::error::ExportError;
use ndarray::ArrayView1;

/// Sorted distinct class labels; a label's position is its histogram slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassIndex {
    classes: Vec<f64>,
}

impl ClassIndex {
    /// Infers the class list from every label in `labels`.
    pub fn from_labels(labels: ArrayView1<'_, f64>) -> Result<Self, ExportError> {
        if let Some(row) = labels.iter().position(|c| c.is_nan()) {
            return Err(ExportError::InvalidLabel { row });
        }
        Ok(Self::normalized(labels.to_vec()))
    }

    /// Uses an explicit class list. Duplicates collapse, order is normalized.
    pub fn with_classes(classes: Vec<f64>) -> Result<Self, ExportError> {
        if let Some(position) = classes.iter().position(|c| c.is_nan()) {
            return Err(ExportError::InvalidClass { position });
        }
        Ok(Self::normalized(classes))
    }

    fn normalized(mut classes: Vec<f64>) -> Self {
        for c in classes.iter_mut() {
            *c = canonical(*c);
        }
        classes.sort_by(f64::total_cmp);
        classes.dedup();
        Self { classes }
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    pub fn slot(&self, label: f64) -> Option<usize> {
        let label = canonical(label);
        self.classes.binary_search_by(|c| c.total_cmp(&label)).ok()
    }

    /// Fails on the first label that has no slot.
    pub fn check_labels(&self, labels: ArrayView1<'_, f64>) -> Result<(), ExportError> {
        for (row, &label) in labels.iter().enumerate() {
            if label.is_nan() {
                return Err(ExportError::InvalidLabel { row });
            }
            if self.slot(label).is_none() {
                return Err(self.mismatch(label));
            }
        }
        Ok(())
    }

    /// Per-class counts over `rows`, one entry per class even when zero.
    pub fn histogram(
        &self,
        labels: ArrayView1<'_, f64>,
        rows: &[usize],
    ) -> Result<Vec<f64>, ExportError> {
        let mut counts = vec![0.0; self.classes.len()];
        for &row in rows {
            let label = labels[row];
            let slot = self.slot(label).ok_or_else(|| self.mismatch(label))?;
            counts[slot] += 1.0;
        }
        Ok(counts)
    }

    fn mismatch(&self, label: f64) -> ExportError {
        ExportError::ClassCountMismatch {
            label,
            n_classes: self.classes.len(),
        }
    }
}

// -0.0 and 0.0 share a slot.
fn canonical(label: f64) -> f64 {
    if label == 0.0 { 0.0 } else { label }
}
