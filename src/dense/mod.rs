use anyhow::{anyhow, bail};
use ndarray::{Array1, Array2};

use crate::utils::{FloatOps, Meshgrid, Standardize};

impl<T: FloatOps> Standardize<T> for Array1<T> {
    fn standardize(&mut self) -> anyhow::Result<(T, T)> {
        if self.len() < 2 {
            bail!(
                "At least two values are required to standardize, got {}",
                self.len()
            );
        }

        let mean = self
            .mean()
            .ok_or_else(|| anyhow!("Cannot compute the mean of an empty array"))?;
        let std_dev = self.std(T::zero());
        if std_dev == T::zero() || !std_dev.is_finite() {
            bail!("Values have zero variance and cannot be scaled to unit variance");
        }

        self.mapv_inplace(|v| (v - mean) / std_dev);
        Ok((mean, std_dev))
    }
}

impl<T: FloatOps> Meshgrid<T> for Array1<T> {
    fn meshgrid(&self, ys: &Self) -> (Array2<T>, Array2<T>) {
        let shape = (ys.len(), self.len());
        let x = Array2::from_shape_fn(shape, |(_, j)| self[j]);
        let y = Array2::from_shape_fn(shape, |(i, _)| ys[i]);
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    #[test]
    fn test_standardize() {
        let mut arr = array![1.0, 2.0, 3.0, 4.0, 5.0];

        let (mean, std_dev) = arr.standardize().unwrap();

        assert_relative_eq!(mean, 3.0);
        assert_relative_eq!(std_dev, 2.0f64.sqrt());
        assert_abs_diff_eq!(arr.mean().unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arr.var(0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(arr[0], -2.0 / 2.0f64.sqrt());
    }

    #[test]
    fn test_standardize_two_values() {
        let mut arr = array![-3.5f32, 10.0];
        arr.standardize().unwrap();
        assert_abs_diff_eq!(arr[0], -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(arr[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_standardize_small_scale() {
        let mut arr = array![1e-18, 3e-18, 5e-18, 7e-18];
        arr.standardize().unwrap();
        assert_abs_diff_eq!(arr.mean().unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arr.var(0.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_standardize_large_offset() {
        let mut arr = array![1e8, 1e8 + 0.25, 1e8 + 0.5, 1e8 + 1.0];
        let (mean, _) = arr.standardize().unwrap();
        assert_relative_eq!(mean, 1e8 + 0.4375);
        assert_abs_diff_eq!(arr.mean().unwrap(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(arr.var(0.0), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_standardize_errors() {
        let mut single = array![1.0];
        assert!(single.standardize().is_err());

        let mut constant = array![2.0, 2.0, 2.0];
        assert!(constant.standardize().is_err());
    }

    #[test]
    fn test_meshgrid() {
        let xs = array![0.0, 1.0, 2.0];
        let ys = array![10.0, 20.0];

        let (x, y) = xs.meshgrid(&ys);

        assert_eq!(x.shape(), &[2, 3]);
        assert_eq!(y.shape(), &[2, 3]);
        assert_eq!(x.row(1).to_vec(), vec![0.0, 1.0, 2.0]);
        assert_eq!(y.column(2).to_vec(), vec![10.0, 20.0]);
    }
}
