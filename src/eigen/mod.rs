//! # Symmetric eigen-decomposition
//!
//! Principal moments and principal axes of a symmetric 2x2 tensor. The eigenvalues of an
//! inertia-type tensor are its principal moments; the eigenvectors are the axes along which the
//! associated quadratic form has no product term.

use anyhow::bail;
use log::debug;
use nalgebra::{Matrix2, Vector2};

const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// The tensor diagonalized by the `principal_axes` program.
pub fn inertia_tensor() -> Matrix2<f64> {
    Matrix2::new(5.0, 4.0, 4.0, 5.0)
}

/// Eigenvalues and unit eigenvectors of a real symmetric 2x2 matrix.
///
/// Order and signs are the ones returned by the solver and are not sorted; use
/// [`SymmetricEigen2::sorted_descending`] when a fixed order matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricEigen2 {
    eigenvalues: Vector2<f64>,
    eigenvectors: Matrix2<f64>,
}

impl SymmetricEigen2 {
    pub fn new(matrix: Matrix2<f64>) -> anyhow::Result<Self> {
        let scale = matrix.amax().max(1.0);
        if (matrix[(0, 1)] - matrix[(1, 0)]).abs() > SYMMETRY_TOLERANCE * scale {
            bail!(
                "Matrix is not symmetric: off-diagonal entries {} and {}",
                matrix[(0, 1)],
                matrix[(1, 0)]
            );
        }

        let eigen = nalgebra::SymmetricEigen::new(matrix);
        debug!(
            "Eigenvalues: [{:.6}, {:.6}], eigenvectors: {}",
            eigen.eigenvalues[0], eigen.eigenvalues[1], eigen.eigenvectors
        );

        Ok(Self {
            eigenvalues: eigen.eigenvalues,
            eigenvectors: eigen.eigenvectors,
        })
    }

    pub fn eigenvalues(&self) -> &Vector2<f64> {
        &self.eigenvalues
    }

    /// Eigenvectors stored as columns, column `i` belonging to eigenvalue `i`.
    pub fn eigenvectors(&self) -> &Matrix2<f64> {
        &self.eigenvectors
    }

    pub fn axis(&self, index: usize) -> Vector2<f64> {
        self.eigenvectors.column(index).into_owned()
    }

    pub fn axes(&self) -> [Vector2<f64>; 2] {
        [self.axis(0), self.axis(1)]
    }

    /// Copy with the largest eigenvalue first.
    pub fn sorted_descending(&self) -> Self {
        let mut sorted = *self;
        if sorted.eigenvalues[0] < sorted.eigenvalues[1] {
            sorted.eigenvalues.swap_rows(0, 1);
            sorted.eigenvectors.swap_columns(0, 1);
        }
        sorted
    }

    /// `V·diag(λ)·Vᵗ`
    pub fn reconstruct(&self) -> Matrix2<f64> {
        self.eigenvectors * Matrix2::from_diagonal(&self.eigenvalues) * self.eigenvectors.transpose()
    }
}
