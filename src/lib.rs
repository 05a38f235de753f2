pub mod contour;
mod dense;
pub mod eigen;
pub mod plot;
pub mod quadratic;
pub mod sampler;
pub mod statistics;
pub mod svd;
mod utils;

pub use utils::FloatOps;
pub use utils::Meshgrid;
pub use utils::Standardize;
