use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use linalg_viz::contour::iso_segments;
use linalg_viz::eigen::{inertia_tensor, SymmetricEigen2};
use linalg_viz::quadratic::{Grid, QuadraticForm};
use linalg_viz::sampler::CorrelatedSamplerBuilder;
use linalg_viz::svd::SVD;
use nalgebra::Matrix2;
use rand::distr::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

#[derive(Clone)]
pub struct DecompositionConfig {
    seed: u64,
    sample_counts: Vec<usize>,
    grid_sizes: Vec<usize>,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sample_counts: vec![200, 10_000, 100_000],
            grid_sizes: vec![50, 200, 1000],
            measurement_time: 5,
            sample_size: 20,
        }
    }
}

fn create_symmetric_matrices(count: usize, seed: u64) -> Vec<Matrix2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let value_dist = Uniform::try_from(-10.0..10.0).unwrap();
    (0..count)
        .map(|_| {
            let off = value_dist.sample(&mut rng);
            Matrix2::new(value_dist.sample(&mut rng), off, off, value_dist.sample(&mut rng))
        })
        .collect()
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &DecompositionConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_decompositions(c: &mut Criterion) {
    let config = DecompositionConfig::default();
    let mut group = configure_group(c, "Decompositions_2x2", &config);
    let matrices = create_symmetric_matrices(1000, config.seed);

    group.bench_function("svd", |b| {
        b.iter(|| {
            for m in &matrices {
                let mut svd = SVD::new();
                svd.compute(*m).unwrap();
            }
        });
    });

    group.bench_function("symmetric_eigen", |b| {
        b.iter(|| {
            for m in &matrices {
                SymmetricEigen2::new(*m).unwrap();
            }
        });
    });
    group.finish();
}

pub fn bench_correlated_sampling(c: &mut Criterion) {
    let config = DecompositionConfig::default();
    let mut group = configure_group(c, "Correlated_Sampling", &config);

    for &n in config.sample_counts.iter() {
        let sampler = CorrelatedSamplerBuilder::new()
            .n_samples(n)
            .seed(config.seed)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("uniform_standardized", n), &n, |b, _| {
            let mut rng = sampler.rng();
            b.iter(|| sampler.uniform_standardized(&mut rng).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("sample_correlated", n), &n, |b, _| {
            let mut rng = sampler.rng();
            b.iter(|| sampler.sample_correlated(&mut rng).unwrap());
        });
    }
    group.finish();
}

pub fn bench_contours(c: &mut Criterion) {
    let config = DecompositionConfig::default();
    let mut group = configure_group(c, "Contour_Extraction", &config);
    let form = QuadraticForm::from_symmetric(&inertia_tensor());

    for &size in config.grid_sizes.iter() {
        let grid = Grid::square(-1.0, 1.0, size).unwrap();
        let values = form.evaluate_grid(&grid);

        group.bench_with_input(
            BenchmarkId::new("iso_segments", format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| iso_segments(&grid, &values, 1.0).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(
    decomposition_benches,
    bench_decompositions,
    bench_correlated_sampling,
    bench_contours
);
criterion_main!(decomposition_benches);
