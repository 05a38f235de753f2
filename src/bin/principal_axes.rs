use linalg_viz::eigen::{inertia_tensor, SymmetricEigen2};
use linalg_viz::plot::{self, PlotStyle};
use linalg_viz::quadratic::{Grid, QuadraticForm};
use log::info;

const GRID_POINTS: usize = 50;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let style = PlotStyle::default();
    let tensor = inertia_tensor();
    let eigen = SymmetricEigen2::new(tensor)?;
    info!("Eigenvalues: {}", eigen.eigenvalues().transpose());
    info!("Unit eigenvectors (columns): {}", eigen.eigenvectors());

    let grid = Grid::square(-1.0, 1.0, GRID_POINTS)?;
    let form = QuadraticForm::from_symmetric(&tensor);
    let principal = QuadraticForm::principal(&eigen);
    info!(
        "Principal form: {:.3}x² + {:.3}y² (was {}x² + {}y² + {}xy)",
        principal.xx, principal.yy, form.xx, form.yy, form.xy
    );

    plot::render_principal_axes(
        &style,
        &grid,
        &form,
        &eigen,
        &principal,
        &style.output_path("principal_axes.svg")?,
    )?;

    Ok(())
}
