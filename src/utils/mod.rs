use std::fmt::Debug;
use std::iter::Sum;

use num_traits::{Float, FromPrimitive};

/// Floating point element usable by the sample statistics.
pub trait FloatOps: Float + FromPrimitive + Sum + Debug + Send + Sync + 'static {}

impl FloatOps for f32 {}
impl FloatOps for f64 {}

pub trait Standardize<T: FloatOps> {
    /// Shifts the values to zero mean and scales them to unit population variance.
    ///
    /// Returns the `(mean, standard deviation)` that was removed.
    fn standardize(&mut self) -> anyhow::Result<(T, T)>;
}

pub trait Meshgrid<T: FloatOps> {
    /// Coordinate matrices in `numpy.meshgrid` layout: rows follow `ys`, columns follow `xs`.
    fn meshgrid(&self, ys: &Self) -> (ndarray::Array2<T>, ndarray::Array2<T>);
}
