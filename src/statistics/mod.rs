//! # Sample statistics
//!
//! Moments and association measures over one-dimensional sample views. Variances use the
//! population normalization (`ddof = 0`) unless a `ddof` is passed explicitly, matching the
//! standardization applied to the sample sets.

use anyhow::{anyhow, bail};
use ndarray::ArrayView1;

use crate::utils::FloatOps;

/// Location and spread of a sample, as reported in the program logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary<T> {
    pub len: usize,
    pub mean: T,
    pub variance: T,
    pub min: T,
    pub max: T,
}

impl<T: FloatOps> Summary<T> {
    pub fn std_dev(&self) -> T {
        self.variance.sqrt()
    }
}

pub fn summarize<T: FloatOps>(values: ArrayView1<T>) -> anyhow::Result<Summary<T>> {
    let mean = values
        .mean()
        .ok_or_else(|| anyhow!("Cannot summarize an empty sample"))?;
    let (min, max) = values
        .iter()
        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    Ok(Summary {
        len: values.len(),
        mean,
        variance: values.var(T::zero()),
        min,
        max,
    })
}

/// Covariance of two equally long samples with `ddof` delta degrees of freedom.
pub fn covariance<T: FloatOps>(a: ArrayView1<T>, b: ArrayView1<T>, ddof: T) -> anyhow::Result<T> {
    check_lengths(&a, &b)?;
    let n = T::from_usize(a.len()).ok_or_else(|| anyhow!("Numeric conversion failed"))?;
    if n <= ddof {
        bail!(
            "Covariance needs more than {:?} observations, got {}",
            ddof,
            a.len()
        );
    }

    let mean_a = a.sum() / n;
    let mean_b = b.sum() / n;
    let sum_ab = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - mean_a) * (y - mean_b))
        .sum::<T>();

    Ok(sum_ab / (n - ddof))
}

/// Pearson correlation coefficient, from centered sums.
///
/// A sample with zero variance has no defined correlation; `0` is returned for it.
pub fn pearson<T: FloatOps>(a: ArrayView1<T>, b: ArrayView1<T>) -> anyhow::Result<T> {
    check_lengths(&a, &b)?;
    if a.len() < 2 {
        bail!("Correlation needs at least two observations, got {}", a.len());
    }

    let n = T::from_usize(a.len()).ok_or_else(|| anyhow!("Numeric conversion failed"))?;
    let mean_a = a.sum() / n;
    let mean_b = b.sum() / n;

    let mut sum_ab = T::zero();
    let mut sum_a_sq = T::zero();
    let mut sum_b_sq = T::zero();

    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sum_ab = sum_ab + dx * dy;
        sum_a_sq = sum_a_sq + dx * dx;
        sum_b_sq = sum_b_sq + dy * dy;
    }

    if sum_a_sq == T::zero() || sum_b_sq == T::zero() {
        return Ok(T::zero());
    }

    // Separate square roots keep the product from underflowing for tiny scales
    let r = sum_ab / (sum_a_sq.sqrt() * sum_b_sq.sqrt());
    Ok(r.max(-T::one()).min(T::one()))
}

fn check_lengths<T>(a: &ArrayView1<T>, b: &ArrayView1<T>) -> anyhow::Result<()> {
    if a.len() != b.len() {
        bail!(
            "Samples must have the same length ({} != {})",
            a.len(),
            b.len()
        );
    }
    Ok(())
}
