//! Principal components of a covariance matrix.
//!
//! The leading eigenvectors serve as loading vectors for curve shocks
//! (level, slope, curvature for a typical rates panel).

use nalgebra::{DMatrix, DVector, SymmetricEigen};

use crate::error::{MathError, MathResult};

/// Leading principal components of a covariance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalLoadings {
    /// Loading vectors, one per component, each of unit length.
    pub loadings: Vec<Vec<f64>>,
    /// Eigenvalue of each component, descending.
    pub eigenvalues: Vec<f64>,
    /// Share of total variance explained by each component.
    pub explained_variance_ratio: Vec<f64>,
}

impl PrincipalLoadings {
    /// Number of components.
    pub fn len(&self) -> usize {
        self.loadings.len()
    }

    /// Returns true when no component was extracted.
    pub fn is_empty(&self) -> bool {
        self.loadings.is_empty()
    }
}

/// Extracts the `n` leading eigenvectors of a symmetric covariance matrix.
///
/// Components are ordered by descending eigenvalue. Each vector's sign is
/// chosen so that its entries sum to a non-negative value, which makes the
/// first component a positive level shift.
///
/// # Errors
///
/// Returns `MathError::DimensionMismatch` for a non-square matrix and
/// `MathError::InvalidInput` if `n` is zero or exceeds the dimension, or if
/// the matrix has non-finite entries.
pub fn principal_loadings(covariance: &DMatrix<f64>, n: usize) -> MathResult<PrincipalLoadings> {
    let (rows, cols) = covariance.shape();
    if rows != cols {
        return Err(MathError::DimensionMismatch {
            rows1: rows,
            cols1: cols,
            rows2: cols,
            cols2: rows,
        });
    }
    if n == 0 || n > rows {
        return Err(MathError::invalid_input(format!(
            "cannot extract {n} components from a {rows}x{cols} covariance"
        )));
    }
    if covariance.iter().any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("covariance has non-finite entries"));
    }

    let eigen = SymmetricEigen::new(covariance.clone());
    let mut order: Vec<usize> = (0..rows).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let total: f64 = eigen.eigenvalues.iter().map(|v| v.max(0.0)).sum();

    let mut loadings = Vec::with_capacity(n);
    let mut eigenvalues = Vec::with_capacity(n);
    let mut explained_variance_ratio = Vec::with_capacity(n);

    for &idx in order.iter().take(n) {
        let mut vector: DVector<f64> = eigen.eigenvectors.column(idx).into_owned();
        if vector.sum() < 0.0 {
            vector.neg_mut();
        }
        let value = eigen.eigenvalues[idx];
        loadings.push(vector.iter().copied().collect());
        eigenvalues.push(value);
        explained_variance_ratio.push(if total > 0.0 { value.max(0.0) / total } else { 0.0 });
    }

    log::debug!(
        "extracted {n} principal loadings, explained variance {explained_variance_ratio:?}"
    );

    Ok(PrincipalLoadings {
        loadings,
        eigenvalues,
        explained_variance_ratio,
    })
}
