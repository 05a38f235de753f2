//! # Iso-lines
//!
//! Marching squares over a [`Grid`]: every cell whose corners straddle the requested level
//! contributes one or two line segments, with crossing points linearly interpolated along the
//! cell edges. Saddle cells are resolved with the average of the four corners.

use anyhow::bail;
use ndarray::Array2;

use crate::quadratic::Grid;

pub type Point = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn length(&self) -> f64 {
        (self.end.0 - self.start.0).hypot(self.end.1 - self.start.1)
    }
}

pub fn iso_segments(grid: &Grid, values: &Array2<f64>, level: f64) -> anyhow::Result<Vec<Segment>> {
    if values.dim() != grid.dim() {
        bail!(
            "Value shape {:?} does not match grid shape {:?}",
            values.dim(),
            grid.dim()
        );
    }

    let (rows, cols) = values.dim();
    let xs = grid.xs();
    let ys = grid.ys();
    let mut segments = Vec::new();

    for i in 0..rows.saturating_sub(1) {
        for j in 0..cols.saturating_sub(1) {
            let bl = ((xs[j], ys[i]), values[[i, j]]);
            let br = ((xs[j + 1], ys[i]), values[[i, j + 1]]);
            let tr = ((xs[j + 1], ys[i + 1]), values[[i + 1, j + 1]]);
            let tl = ((xs[j], ys[i + 1]), values[[i + 1, j]]);

            let bottom = crossing(bl, br, level);
            let right = crossing(br, tr, level);
            let top = crossing(tl, tr, level);
            let left = crossing(bl, tl, level);

            match (bottom, right, top, left) {
                (Some(b), Some(r), Some(t), Some(l)) => {
                    let center = (bl.1 + br.1 + tr.1 + tl.1) / 4.0;
                    if (bl.1 >= level) == (center >= level) {
                        segments.push(Segment { start: b, end: r });
                        segments.push(Segment { start: t, end: l });
                    } else {
                        segments.push(Segment { start: l, end: b });
                        segments.push(Segment { start: r, end: t });
                    }
                }
                _ => {
                    let mut found = [bottom, right, top, left].into_iter().flatten();
                    if let (Some(start), Some(end)) = (found.next(), found.next()) {
                        segments.push(Segment { start, end });
                    }
                }
            }
        }
    }

    Ok(segments)
}

fn crossing((p0, v0): (Point, f64), (p1, v1): (Point, f64), level: f64) -> Option<Point> {
    if (v0 >= level) == (v1 >= level) {
        return None;
    }
    let t = (level - v0) / (v1 - v0);
    Some((p0.0 + t * (p1.0 - p0.0), p0.1 + t * (p1.1 - p0.1)))
}
