use anyhow::bail;
use nalgebra::{Matrix2, Vector2};
use ndarray::{Array1, Array2, Zip};

use crate::eigen::SymmetricEigen2;
use crate::utils::Meshgrid;

/// Regular grid over a rectangle, stored as `meshgrid` coordinate matrices.
#[derive(Debug, Clone)]
pub struct Grid {
    xs: Array1<f64>,
    ys: Array1<f64>,
    x: Array2<f64>,
    y: Array2<f64>,
}

impl Grid {
    pub fn new(
        (x_min, x_max): (f64, f64),
        (y_min, y_max): (f64, f64),
        n_points: usize,
    ) -> anyhow::Result<Self> {
        if n_points < 2 {
            bail!("A grid needs at least two points per axis, got {}", n_points);
        }
        if !(x_min < x_max) || !(y_min < y_max) {
            bail!(
                "Invalid grid bounds x: [{}, {}], y: [{}, {}]",
                x_min,
                x_max,
                y_min,
                y_max
            );
        }

        let xs = Array1::linspace(x_min, x_max, n_points);
        let ys = Array1::linspace(y_min, y_max, n_points);
        let (x, y) = xs.meshgrid(&ys);
        Ok(Self { xs, ys, x, y })
    }

    /// Square grid over `[lower, upper]²`.
    pub fn square(lower: f64, upper: f64, n_points: usize) -> anyhow::Result<Self> {
        Self::new((lower, upper), (lower, upper), n_points)
    }

    pub fn xs(&self) -> &Array1<f64> {
        &self.xs
    }

    pub fn ys(&self) -> &Array1<f64> {
        &self.ys
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// `(rows, columns)`, i.e. `(ys.len(), xs.len())`.
    pub fn dim(&self) -> (usize, usize) {
        self.x.dim()
    }
}

/// Binary quadratic form `z = xx·x² + yy·y² + xy·x·y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticForm {
    pub xx: f64,
    pub yy: f64,
    pub xy: f64,
}

impl QuadraticForm {
    pub fn new(xx: f64, yy: f64, xy: f64) -> Self {
        Self { xx, yy, xy }
    }

    /// The form `vᵗ·M·v` of a symmetric matrix.
    pub fn from_symmetric(matrix: &Matrix2<f64>) -> Self {
        Self {
            xx: matrix[(0, 0)],
            yy: matrix[(1, 1)],
            xy: matrix[(0, 1)] + matrix[(1, 0)],
        }
    }

    /// The same form expressed in its principal axes: no product term, the larger principal moment
    /// on `x²`.
    pub fn principal(eigen: &SymmetricEigen2) -> Self {
        let moments = eigen.sorted_descending();
        Self {
            xx: moments.eigenvalues()[0],
            yy: moments.eigenvalues()[1],
            xy: 0.0,
        }
    }

    pub fn matrix(&self) -> Matrix2<f64> {
        let half = self.xy / 2.0;
        Matrix2::new(self.xx, half, half, self.yy)
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.xx * x * x + self.yy * y * y + self.xy * x * y
    }

    pub fn evaluate_grid(&self, grid: &Grid) -> Array2<f64> {
        Zip::from(grid.x())
            .and(grid.y())
            .map_collect(|&x, &y| self.evaluate(x, y))
    }

    /// Distance from the origin to the `level` curve along `direction`.
    pub fn semi_axis(&self, direction: &Vector2<f64>, level: f64) -> anyhow::Result<f64> {
        let norm = direction.norm();
        if !(norm > 0.0) {
            bail!("Direction must be a non-zero vector");
        }
        let unit = direction / norm;
        let value = self.evaluate(unit[0], unit[1]);
        if !(value > 0.0) || !(level > 0.0) {
            bail!(
                "Level {} is never reached along direction ({}, {}), form value {}",
                level,
                unit[0],
                unit[1],
                value
            );
        }
        Ok((level / value).sqrt())
    }
}
