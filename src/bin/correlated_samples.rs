use linalg_viz::plot::{self, PlotStyle};
use linalg_viz::sampler::CorrelatedSamplerBuilder;
use linalg_viz::statistics;
use log::info;

const RHO: f64 = 0.8;
const LOWER: f64 = -5.0;
const UPPER: f64 = 5.0;
const NUM: usize = 200;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let style = PlotStyle::default();
    let sampler = CorrelatedSamplerBuilder::new()
        .rho(RHO)
        .bounds(LOWER, UPPER)
        .n_samples(NUM)
        .build()?;
    info!(
        "Sampling {} points with rho = {} (seed {})",
        sampler.n_samples(),
        sampler.rho(),
        sampler.seed()
    );
    let mut rng = sampler.rng();

    let before = sampler.uniform_standardized(&mut rng)?;
    let x = statistics::summarize(before.x().view())?;
    let y = statistics::summarize(before.y().view())?;
    info!(
        "Standardized uniform samples: x mean {:.3e} std {:.6} in [{:.3}, {:.3}], y mean {:.3e} std {:.6} in [{:.3}, {:.3}]",
        x.mean,
        x.std_dev(),
        x.min,
        x.max,
        y.mean,
        y.std_dev(),
        y.min,
        y.max
    );
    plot::render_standardized(&style, &before, &style.output_path("before_tran.svg")?)?;

    if let Some(s) = sampler.decomposition().s() {
        info!("Singular values of the covariance matrix: [{:.6}, {:.6}]", s[0], s[1]);
    }
    let after = sampler.sample_correlated(&mut rng)?;
    info!(
        "Empirical correlation {:.4} for requested {}",
        after.correlation()?,
        sampler.rho()
    );
    let direction = sampler.principal_direction()?;
    plot::render_correlated(
        &style,
        &after,
        &direction,
        sampler.rho(),
        &style.output_path("after_tran.svg")?,
    )?;

    Ok(())
}
