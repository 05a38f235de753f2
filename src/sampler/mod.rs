//! # Correlated sampling
//!
//! Draws two-dimensional samples whose expected covariance is `[[1, ρ], [ρ, 1]]`.
//!
//! The covariance matrix is factored with an SVD, `C = U·Σ·Vᵗ`, and independent standard-normal
//! draws `Z` are colored with `U·sqrt(Σ)`. For a symmetric positive semi-definite `C` this gives
//! `Cov(U·sqrt(Σ)·Z) = U·Σ·Uᵗ = C`.
//!
//! A ρ outside `[-1, 1]` yields a matrix that is not positive semi-definite. The decomposition still
//! succeeds and samples are still produced, but their correlation no longer matches ρ; this is only
//! reported as a warning.

use anyhow::{anyhow, bail};
use log::{debug, warn};
use nalgebra::{Matrix2, Vector2};
use ndarray::{array, Array1, Array2};
use rand::distr::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;

use crate::statistics;
use crate::svd::SVD;
use crate::utils::Standardize;

/// Paired `(x, y)` observations.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl SampleSet {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> anyhow::Result<Self> {
        if x.len() != y.len() {
            bail!(
                "Sample coordinates must have the same length ({} != {})",
                x.len(),
                y.len()
            );
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Standardizes both coordinates independently to zero mean and unit variance.
    pub fn standardize(&mut self) -> anyhow::Result<()> {
        self.x.standardize()?;
        self.y.standardize()?;
        Ok(())
    }

    pub fn correlation(&self) -> anyhow::Result<f64> {
        statistics::pearson(self.x.view(), self.y.view())
    }

    /// Empirical covariance matrix with population normalization.
    pub fn covariance(&self) -> anyhow::Result<Matrix2<f64>> {
        let xx = statistics::covariance(self.x.view(), self.x.view(), 0.0)?;
        let yy = statistics::covariance(self.y.view(), self.y.view(), 0.0)?;
        let xy = statistics::covariance(self.x.view(), self.y.view(), 0.0)?;
        Ok(Matrix2::new(xx, xy, xy, yy))
    }

    /// Largest absolute coordinate, used to size plot axes.
    pub fn extent(&self) -> f64 {
        self.x
            .iter()
            .chain(self.y.iter())
            .fold(0.0f64, |acc, v| acc.max(v.abs()))
    }
}

pub struct CorrelatedSamplerBuilder {
    rho: f64,
    bounds: (f64, f64),
    n_samples: usize,
    seed: Option<u64>,
}

impl CorrelatedSamplerBuilder {
    pub fn new() -> Self {
        CorrelatedSamplerBuilder {
            rho: 0.8,
            bounds: (-5.0, 5.0),
            n_samples: 200,
            seed: None,
        }
    }

    pub fn rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Interval of the uniform draws that are standardized before the transform.
    pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = (lower, upper);
        self
    }

    pub fn n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> anyhow::Result<CorrelatedSampler> {
        let (lower, upper) = self.bounds;
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            bail!("Invalid sampling interval [{}, {}]", lower, upper);
        }
        if self.n_samples < 2 {
            bail!("At least two samples are required, got {}", self.n_samples);
        }
        if !self.rho.is_finite() {
            bail!("Correlation coefficient must be finite, got {}", self.rho);
        }
        if !(-1.0..=1.0).contains(&self.rho) {
            warn!(
                "Correlation coefficient {} is outside [-1, 1]; the covariance matrix is not positive semi-definite",
                self.rho
            );
        }

        let covariance = covariance_matrix(self.rho);
        let mut svd = SVD::new();
        svd.compute(covariance)?;
        let transform = svd
            .coloring_transform()
            .ok_or_else(|| anyhow!("SVD produced no coloring transform"))?;
        debug!("Coloring transform U·sqrt(S): {}", transform);

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());

        Ok(CorrelatedSampler {
            rho: self.rho,
            lower,
            upper,
            n_samples: self.n_samples,
            seed,
            covariance,
            svd,
            transform,
        })
    }
}

impl Default for CorrelatedSamplerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CorrelatedSampler {
    rho: f64,
    lower: f64,
    upper: f64,
    n_samples: usize,
    seed: u64,
    covariance: Matrix2<f64>,
    svd: SVD,
    transform: Matrix2<f64>,
}

impl CorrelatedSampler {
    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Seed of [`CorrelatedSampler::rng`]; drawn from the OS when none was configured.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    /// `[[1, ρ], [ρ, 1]]`
    pub fn covariance_matrix(&self) -> &Matrix2<f64> {
        &self.covariance
    }

    pub fn decomposition(&self) -> &SVD {
        &self.svd
    }

    pub fn coloring_transform(&self) -> &Matrix2<f64> {
        &self.transform
    }

    /// First left singular vector, the direction of largest spread.
    pub fn principal_direction(&self) -> anyhow::Result<Vector2<f64>> {
        self.svd
            .u()
            .map(|u| u.column(0).into_owned())
            .ok_or_else(|| anyhow!("SVD has not been computed"))
    }

    /// Uniform draws in `[lower, upper)` for both coordinates, standardized.
    pub fn uniform_standardized<R: Rng + ?Sized>(&self, rng: &mut R) -> anyhow::Result<SampleSet> {
        let uniform = Uniform::new(self.lower, self.upper)
            .map_err(|e| anyhow!("Invalid sampling interval: {}", e))?;
        let x = Array1::from_iter((0..self.n_samples).map(|_| uniform.sample(&mut *rng)));
        let y = Array1::from_iter((0..self.n_samples).map(|_| uniform.sample(&mut *rng)));

        let mut samples = SampleSet::new(x, y)?;
        samples.standardize()?;
        Ok(samples)
    }

    /// Colors a `2×n` standard-normal matrix with `U·sqrt(Σ)`.
    pub fn sample_correlated<R: Rng + ?Sized>(&self, rng: &mut R) -> anyhow::Result<SampleSet> {
        let white: Array2<f64> =
            Array2::from_shape_fn((2, self.n_samples), |_| rng.sample(StandardNormal));
        let t = &self.transform;
        let transform = array![[t[(0, 0)], t[(0, 1)]], [t[(1, 0)], t[(1, 1)]]];
        let colored = transform.dot(&white);

        SampleSet::new(colored.row(0).to_owned(), colored.row(1).to_owned())
    }

    /// Empirical correlation of `n_trials` independent correlated draws.
    ///
    /// Trial `k` uses stream `k` of a ChaCha8 generator seeded with [`CorrelatedSampler::seed`],
    /// so the result does not depend on how rayon schedules the trials.
    pub fn correlation_trials(&self, n_trials: usize) -> anyhow::Result<Vec<f64>> {
        (0..n_trials)
            .into_par_iter()
            .map(|trial| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
                rng.set_stream(trial as u64);
                self.sample_correlated(&mut rng)?.correlation()
            })
            .collect()
    }
}

/// `[[1, ρ], [ρ, 1]]`
pub fn covariance_matrix(rho: f64) -> Matrix2<f64> {
    Matrix2::new(1.0, rho, rho, 1.0)
}
