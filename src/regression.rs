//! Ordinary least-squares line fit.

use core::fmt;

use crate::strain_gauge::CalibrationEquation;

/// Relative spread in x, `Σ(x − x̄)² / Σx²`, below which the points count as one x.
const SPREAD_TOLERANCE: f64 = 1.0e-6;

/// The points do not determine a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateCalibration;

impl fmt::Display for DegenerateCalibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("calibration points have no spread in x")
    }
}

/// Fit `y = slope * x + intercept` through `(x, y)` points.
///
/// Needs at least two distinct x values. Sums are taken around the means in
/// f64 so that many identical x values cancel exactly.
pub fn fit_line(points: &[(f32, f32)]) -> Result<CalibrationEquation, DegenerateCalibration> {
    if points.len() < 2 {
        log::warn!("need at least two calibration points, got {}", points.len());
        return Err(DegenerateCalibration);
    }
    let n = points.len() as f64;

    let (mut sum_x, mut sum_y) = (0.0f64, 0.0f64);
    for &(x, y) in points {
        sum_x += f64::from(x);
        sum_y += f64::from(y);
    }
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let (mut sxx, mut sxy, mut sum_x2) = (0.0f64, 0.0f64, 0.0f64);
    for &(x, y) in points {
        let dx = f64::from(x) - mean_x;
        sxx += dx * dx;
        sxy += dx * (f64::from(y) - mean_y);
        sum_x2 += f64::from(x) * f64::from(x);
    }

    if sxx <= SPREAD_TOLERANCE * sum_x2 {
        log::warn!("calibration points have no spread in x (n = {})", points.len());
        return Err(DegenerateCalibration);
    }

    let slope = (sxy / sxx) as f32;
    let intercept = (mean_y - (sxy / sxx) * mean_x) as f32;
    if !slope.is_finite() || !intercept.is_finite() {
        log::warn!("calibration fit is not finite: slope {slope}, intercept {intercept}");
        return Err(DegenerateCalibration);
    }

    log::debug!("slope: {slope}, intercept: {intercept}");
    Ok(CalibrationEquation { slope, intercept })
}
