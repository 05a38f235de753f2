//! # Rendering
//!
//! SVG figures drawn with plotters. [`PlotStyle`] carries the font and canvas settings shared by
//! every figure of a run, and the directory the figures are written to.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;
use nalgebra::Vector2;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::contour::{self, Segment};
use crate::eigen::SymmetricEigen2;
use crate::quadratic::{Grid, QuadraticForm};
use crate::sampler::SampleSet;

type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const DASHES: usize = 12;

#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub font_family: String,
    pub caption_size: u32,
    pub label_size: u32,
    pub scatter_size: (u32, u32),
    pub panels_size: (u32, u32),
    pub point_radius: u32,
    pub output_dir: PathBuf,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            caption_size: 24,
            label_size: 16,
            scatter_size: (800, 800),
            panels_size: (1600, 1000),
            point_radius: 3,
            output_dir: PathBuf::from("plots"),
        }
    }
}

impl PlotStyle {
    /// Path of `file_name` inside the output directory, creating the directory if needed.
    pub fn output_path(&self, file_name: &str) -> anyhow::Result<PathBuf> {
        create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output_dir.display()
            )
        })?;
        Ok(self.output_dir.join(file_name))
    }

    fn font(&self, size: u32) -> TextStyle<'_> {
        (self.font_family.as_str(), size).into()
    }
}

/// Scatter plot of standardized samples with dashed reference lines through the origin.
pub fn render_standardized(style: &PlotStyle, samples: &SampleSet, path: &Path) -> anyhow::Result<()> {
    let limit = axis_limit(samples.extent().max(5.0));

    let root = SVGBackend::new(path, style.scatter_size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = scatter_chart(style, &root, "before_tran", limit)?;

    draw_samples(style, &mut chart, samples, BLUE)?;
    draw_dashed(&mut chart, (-5.0, 0.0), (5.0, 0.0), RED.stroke_width(1))?;
    draw_dashed(&mut chart, (0.0, -5.0), (0.0, 5.0), RED.stroke_width(1))?;

    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Scatter plot of correlated samples with the principal direction overlaid and labelled with ρ.
pub fn render_correlated(
    style: &PlotStyle,
    samples: &SampleSet,
    direction: &Vector2<f64>,
    rho: f64,
    path: &Path,
) -> anyhow::Result<()> {
    let limit = axis_limit(samples.extent().max(5.0));
    let tip = (direction[0] * 5.0, direction[1] * 5.0);

    let root = SVGBackend::new(path, style.scatter_size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = scatter_chart(style, &root, "after_tran", limit)?;

    draw_samples(style, &mut chart, samples, BLUE)?;
    draw_dashed(&mut chart, (-tip.0, -tip.1), tip, RED.stroke_width(3))?;
    chart.draw_series(std::iter::once(Text::new(
        format!("Correlation coefficient={}", rho),
        tip,
        style.font(style.label_size),
    )))?;

    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Two panels: the level-1 contour of `form` with its principal axes, and the level-1 contour of
/// the same form after the change of basis.
pub fn render_principal_axes(
    style: &PlotStyle,
    grid: &Grid,
    form: &QuadraticForm,
    eigen: &SymmetricEigen2,
    principal: &QuadraticForm,
    path: &Path,
) -> anyhow::Result<()> {
    let before = contour::iso_segments(grid, &form.evaluate_grid(grid), 1.0)?;
    let after = contour::iso_segments(grid, &principal.evaluate_grid(grid), 1.0)?;
    let x_range = (grid.xs()[0], grid.xs()[grid.xs().len() - 1]);
    let y_range = (grid.ys()[0], grid.ys()[grid.ys().len() - 1]);

    let root = SVGBackend::new(path, style.panels_size).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    let mut chart = ChartBuilder::on(&panels[0])
        .caption("Before the principal axis transform", style.font(style.caption_size))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;
    chart.configure_mesh().disable_mesh().draw()?;
    draw_axes(&mut chart, x_range, y_range)?;
    draw_segments(&mut chart, &before, BLUE)?;
    chart.draw_series(std::iter::once(Circle::new((0.0, 0.0), 5, BLACK.filled())))?;
    for axis in eigen.axes() {
        draw_dashed(&mut chart, (0.0, 0.0), (axis[0], axis[1]), RED.stroke_width(2))?;
    }

    let mut chart = ChartBuilder::on(&panels[1])
        .caption("After the principal axis transform", style.font(style.caption_size))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;
    chart.configure_mesh().disable_mesh().draw()?;
    draw_axes(&mut chart, x_range, y_range)?;
    draw_segments(&mut chart, &after, BLUE)?;
    chart.draw_series(std::iter::once(Text::new(
        format!("{:.3}x² + {:.3}y² = 1", principal.xx, principal.yy),
        (x_range.0 + 0.05 * (x_range.1 - x_range.0), y_range.1 - 0.1 * (y_range.1 - y_range.0)),
        style.font(style.label_size),
    )))?;

    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn scatter_chart<'a, 'b>(
    style: &PlotStyle,
    area: &'a DrawingArea<SVGBackend<'b>, Shift>,
    title: &str,
    limit: f64,
) -> anyhow::Result<Chart<'a, 'b>> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, style.font(style.caption_size))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-limit..limit, -limit..limit)?;
    chart.configure_mesh().draw()?;
    Ok(chart)
}

fn draw_samples(
    style: &PlotStyle,
    chart: &mut Chart<'_, '_>,
    samples: &SampleSet,
    color: RGBColor,
) -> anyhow::Result<()> {
    let radius = style.point_radius;
    chart.draw_series(
        samples
            .points()
            .map(|p| Circle::new(p, radius, color.mix(0.6).filled())),
    )?;
    Ok(())
}

fn draw_segments(chart: &mut Chart<'_, '_>, segments: &[Segment], color: RGBColor) -> anyhow::Result<()> {
    chart.draw_series(
        segments
            .iter()
            .map(|s| PathElement::new(vec![s.start, s.end], color.stroke_width(2))),
    )?;
    Ok(())
}

fn draw_axes(chart: &mut Chart<'_, '_>, x_range: (f64, f64), y_range: (f64, f64)) -> anyhow::Result<()> {
    chart.draw_series([
        PathElement::new(vec![(x_range.0, 0.0), (x_range.1, 0.0)], BLACK.stroke_width(1)),
        PathElement::new(vec![(0.0, y_range.0), (0.0, y_range.1)], BLACK.stroke_width(1)),
    ])?;
    Ok(())
}

fn draw_dashed(
    chart: &mut Chart<'_, '_>,
    from: (f64, f64),
    to: (f64, f64),
    stroke: ShapeStyle,
) -> anyhow::Result<()> {
    chart.draw_series(
        dashes(from, to, DASHES)
            .into_iter()
            .map(|(a, b)| PathElement::new(vec![a, b], stroke)),
    )?;
    Ok(())
}

/// Splits `from → to` into `2·count - 1` equal pieces and keeps every other one.
fn dashes(from: (f64, f64), to: (f64, f64), count: usize) -> Vec<((f64, f64), (f64, f64))> {
    let pieces = (2 * count).saturating_sub(1).max(1);
    let at = |k: usize| {
        let t = k as f64 / pieces as f64;
        (from.0 + t * (to.0 - from.0), from.1 + t * (to.1 - from.1))
    };
    (0..pieces).step_by(2).map(|k| (at(k), at(k + 1))).collect()
}

/// Rounds the half-width of a symmetric axis up to the next integer.
fn axis_limit(extent: f64) -> f64 {
    extent.ceil().max(1.0)
}
