use anyhow::anyhow;
use log::debug;
use nalgebra::{Matrix2, Vector2};

/// Singular value decomposition `A = U·Σ·Vᵗ` of a 2x2 matrix.
///
/// Singular values are ordered from largest to smallest, with the columns of `U` and the rows of
/// `Vᵗ` permuted accordingly. Signs are whatever the underlying solver produced.
pub struct SVD {
    u: Option<Matrix2<f64>>,
    s: Option<Vector2<f64>>,
    vt: Option<Matrix2<f64>>,
}

impl SVD {
    pub fn new() -> Self {
        SVD {
            u: None,
            s: None,
            vt: None,
        }
    }

    pub fn compute(&mut self, matrix: Matrix2<f64>) -> anyhow::Result<()> {
        let svd = matrix.svd(true, true);

        let mut u = svd
            .u
            .ok_or_else(|| anyhow!("SVD did not produce the left singular vectors"))?;
        let mut vt = svd
            .v_t
            .ok_or_else(|| anyhow!("SVD did not produce the right singular vectors"))?;
        let mut s = svd.singular_values;

        if s[0] < s[1] {
            s.swap_rows(0, 1);
            u.swap_columns(0, 1);
            vt.swap_rows(0, 1);
        }

        debug!("SVD singular values: [{:.6}, {:.6}]", s[0], s[1]);

        self.u = Some(u);
        self.s = Some(s);
        self.vt = Some(vt);

        Ok(())
    }

    pub fn u(&self) -> Option<&Matrix2<f64>> {
        self.u.as_ref()
    }

    pub fn s(&self) -> Option<&Vector2<f64>> {
        self.s.as_ref()
    }

    pub fn vt(&self) -> Option<&Matrix2<f64>> {
        self.vt.as_ref()
    }

    // Reconstruct the original matrix
    pub fn reconstruct(&self) -> Option<Matrix2<f64>> {
        match (self.u(), self.s(), self.vt()) {
            (Some(u), Some(s), Some(vt)) => Some(u * Matrix2::from_diagonal(s) * vt),
            _ => None,
        }
    }

    /// `diag(sqrt(σ₁), sqrt(σ₂))`.
    pub fn sqrt_scale(&self) -> Option<Matrix2<f64>> {
        self.s()
            .map(|s| Matrix2::from_diagonal(&s.map(|sigma| sigma.max(0.0).sqrt())))
    }

    /// `U·sqrt(Σ)`: maps white noise onto a distribution whose covariance is the decomposed
    /// matrix, provided that matrix is symmetric positive semi-definite.
    pub fn coloring_transform(&self) -> Option<Matrix2<f64>> {
        match (self.u(), self.sqrt_scale()) {
            (Some(u), Some(scale)) => Some(u * scale),
            _ => None,
        }
    }
}

impl Default for SVD {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_simple_svd() {
        let a = Matrix2::new(1.0, 2.0, 3.0, 4.0);
        let mut svd = SVD::new();
        svd.compute(a).unwrap();
        let s = svd.s().unwrap();

        // Check singular values (pre-computed)
        assert_abs_diff_eq!(s[0], 5.4649857, epsilon = 1e-6);
        assert_abs_diff_eq!(s[1], 0.3659662, epsilon = 1e-6);

        // Check reconstruction
        let reconstructed = svd.reconstruct().unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_abs_diff_eq!(reconstructed[(i, j)], a[(i, j)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_empty_svd() {
        let svd = SVD::default();
        assert!(svd.u().is_none());
        assert!(svd.reconstruct().is_none());
        assert!(svd.coloring_transform().is_none());
    }

    #[test]
    fn test_correlation_matrix_svd() {
        let cov = Matrix2::new(1.0, 0.8, 0.8, 1.0);
        let mut svd = SVD::new();
        svd.compute(cov).unwrap();

        let s = svd.s().unwrap();
        assert_abs_diff_eq!(s[0], 1.8, epsilon = 1e-10);
        assert_abs_diff_eq!(s[1], 0.2, epsilon = 1e-10);

        let scale = svd.sqrt_scale().unwrap();
        assert_abs_diff_eq!(scale[(0, 0)], 1.8f64.sqrt(), epsilon = 1e-10);
        assert_abs_diff_eq!(scale[(1, 1)], 0.2f64.sqrt(), epsilon = 1e-10);
        assert_abs_diff_eq!(scale[(0, 1)], 0.0);

        // U is orthogonal
        let u = svd.u().unwrap();
        let identity = u.transpose() * u;
        assert_abs_diff_eq!(identity, Matrix2::identity(), epsilon = 1e-10);

        // The coloring transform reproduces the covariance: T·Tᵗ = U·Σ·Uᵗ
        let t = svd.coloring_transform().unwrap();
        assert_abs_diff_eq!(t * t.transpose(), cov, epsilon = 1e-10);
    }

    #[test]
    fn test_svd_is_deterministic() {
        let cov = Matrix2::new(1.0, -0.3, -0.3, 1.0);
        let mut first = SVD::new();
        let mut second = SVD::new();
        first.compute(cov).unwrap();
        second.compute(cov).unwrap();

        assert_eq!(first.s(), second.s());
        assert_eq!(first.u(), second.u());
        assert_eq!(first.vt(), second.vt());
    }
}
