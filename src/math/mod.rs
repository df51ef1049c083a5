//! # Regression and Order-Statistics Primitives
//!
//! Small numeric building blocks shared by the trend estimator and the
//! Hi-Lo engine: medians, quartiles, Theil-Sen, and ordinary least squares.
//!
//! These routines operate on plain slices and make no assumptions about
//! where the data came from. The parameter dimension is tiny (a slope and
//! an intercept), so closed-form solutions are used throughout; there is no
//! matrix algebra to go ill-conditioned.

/// Median of a sample. Returns `None` for an empty slice.
///
/// Even-length samples return the mean of the two middle values.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(median_sorted(&sorted))
}

/// Median of an already-sorted, non-empty sample.
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        sorted.get(mid).copied().unwrap_or(f64::NAN)
    } else {
        let lo = sorted.get(mid - 1).copied().unwrap_or(f64::NAN);
        let hi = sorted.get(mid).copied().unwrap_or(f64::NAN);
        (lo + hi) / 2.0
    }
}

/// First and third quartiles of a sample by linear interpolation at ranks
/// `(n-1)/4` and `3(n-1)/4`. Returns `None` for an empty slice.
#[must_use]
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some((quantile_sorted(&sorted, 0.25), quantile_sorted(&sorted, 0.75)))
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted.first().copied().unwrap_or(f64::NAN);
    }
    let rank = q * (n - 1) as f64;
    let lo_idx = rank.floor() as usize;
    let hi_idx = rank.ceil() as usize;
    let lo = sorted.get(lo_idx).copied().unwrap_or(f64::NAN);
    let hi = sorted.get(hi_idx).copied().unwrap_or(f64::NAN);
    lo + (hi - lo) * (rank - lo_idx as f64)
}

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
}

/// Theil-Sen robust line fit: the slope is the median of all pairwise
/// slopes, the intercept the median of `y_i - slope * x_i`.
///
/// Returns `None` when fewer than two points with distinct x values exist.
/// On exactly two points this reduces to the exact two-point line.
#[must_use]
pub fn theil_sen(points: &[(f64, f64)]) -> Option<LineFit> {
    if points.len() < 2 {
        return None;
    }

    let mut slopes = Vec::with_capacity(points.len() * (points.len() - 1) / 2);
    for (i, &(xi, yi)) in points.iter().enumerate() {
        for &(xj, yj) in points.iter().skip(i + 1) {
            if (xj - xi).abs() > f64::EPSILON {
                slopes.push((yj - yi) / (xj - xi));
            }
        }
    }
    let slope = median(&slopes)?;

    let residuals: Vec<f64> = points.iter().map(|&(x, y)| y - slope * x).collect();
    let intercept = median(&residuals)?;

    Some(LineFit { slope, intercept })
}

/// Ordinary least squares line fit.
///
/// Returns `None` when fewer than two points exist or when all x values
/// coincide (vertical line).
#[must_use]
pub fn ols(points: &[(f64, f64)]) -> Option<LineFit> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = points.iter().map(|&(x, _)| x).sum::<f64>() / n_f;
    let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in points {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx.abs() < f64::EPSILON {
        return None;
    }

    let slope = sxy / sxx;
    Some(LineFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
