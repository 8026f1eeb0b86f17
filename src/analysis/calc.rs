//! Pure calculation functions over co-indexed time/value series
//!
//! All functions assume `times` is strictly increasing and has the same
//! length as `values`.

use super::AUCMethod;

/// Area of one segment between two samples
///
/// With [`AUCMethod::LinUpLogDown`] a falling segment between two positive
/// values is integrated as exponential decay; everything else uses the
/// trapezoid.
#[inline]
pub fn auc_segment(t1: f64, c1: f64, t2: f64, c2: f64, method: AUCMethod) -> f64 {
    let dt = t2 - t1;
    if dt <= 0.0 {
        return 0.0;
    }

    let falling = c2 < c1 && c2 > 0.0 && (c1 / c2 - 1.0).abs() >= 1e-10;
    match method {
        AUCMethod::LinUpLogDown if falling => (c1 - c2) * dt / (c1 / c2).ln(),
        _ => 0.5 * (c1 + c2) * dt,
    }
}

/// Area under the whole series
pub fn auc(times: &[f64], values: &[f64], method: AUCMethod) -> f64 {
    times
        .windows(2)
        .zip(values.windows(2))
        .map(|(t, c)| auc_segment(t[0], c[0], t[1], c[1], method))
        .sum()
}

/// Index of the first maximum, `None` for an empty series
pub fn peak_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Linear interpolation of the series at `time`, clamped to the end points
///
/// An empty series interpolates to 0.
pub fn interpolate(times: &[f64], values: &[f64], time: f64) -> f64 {
    let Some(last) = times.len().checked_sub(1) else {
        return 0.0;
    };
    if time <= times[0] {
        return values[0];
    }
    if time >= times[last] {
        return values[last];
    }

    // first sample at or after `time`; always in 1..=last here
    let upper = times.partition_point(|&t| t < time);
    let lower = upper - 1;

    let (t1, t2) = (times[lower], times[upper]);
    let (c1, c2) = (values[lower], values[upper]);
    if (t2 - t1).abs() < 1e-10 {
        c1
    } else {
        c1 + (c2 - c1) * (time - t1) / (t2 - t1)
    }
}

/// Total time the series spends strictly above `threshold`
///
/// Crossings inside a segment are located by linear interpolation.
pub fn time_above(times: &[f64], values: &[f64], threshold: f64) -> f64 {
    let mut total = 0.0;
    for i in 1..times.len() {
        let (t1, t2) = (times[i - 1], times[i]);
        let (c1, c2) = (values[i - 1], values[i]);
        let above1 = c1 > threshold;
        let above2 = c2 > threshold;

        total += match (above1, above2) {
            (true, true) => t2 - t1,
            (false, false) => 0.0,
            _ => {
                let crossing = t1 + (threshold - c1) * (t2 - t1) / (c2 - c1);
                if above1 {
                    crossing - t1
                } else {
                    t2 - crossing
                }
            }
        };
    }
    total
}
