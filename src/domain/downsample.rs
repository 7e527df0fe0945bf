//! Fixed-stride thinning of long series for charting.
//!
//! Only ever applied to a finished series; scalar metrics are computed on the
//! full series first.

/// Upper bound on points handed to a chart.
pub const MAX_CHART_POINTS: usize = 365;

/// Keeps every `stride`-th point where `stride = ceil(len / max_points)`.
/// The first and last points are always kept, so the result may hold one
/// point more than `max_points`.
pub fn downsample<T: Clone>(points: &[T], max_points: usize) -> Vec<T> {
    if points.len() <= max_points || max_points == 0 {
        return points.to_vec();
    }

    let stride = points.len().div_ceil(max_points);
    let last = points.len() - 1;

    let mut out: Vec<T> = points.iter().step_by(stride).cloned().collect();
    if last % stride != 0 {
        out.push(points[last].clone());
    }
    out
}
