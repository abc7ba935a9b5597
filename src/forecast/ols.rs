use itertools::izip;

use crate::error::CtforecastErr;
use crate::forecast::error::ForecastComputationError;
use crate::forecast::types::EnrollmentHistory;

/// Fitted linear enrollment trend with a HAC-robust coefficient covariance
#[derive(Debug, Clone, Copy)]
pub struct TrendFit {
    pub intercept: f64,
    pub slope: f64,
    pub var_intercept: f64,
    pub var_slope: f64,
    pub cov_intercept_slope: f64,
    pub r_squared: f64,
    pub newey_west_lag: usize,
}

impl TrendFit {
    pub fn slope_se(&self) -> f64 {
        self.var_slope.sqrt()
    }

    /// Fitted cumulative enrollment at a given elapsed day
    pub fn predict(&self, elapsed_days: f64) -> f64 {
        self.intercept + self.slope * elapsed_days
    }
}

/// Newey-West truncation lag as a fixed, reproducible function of sample
/// size: floor(4 * (T / 100)^(2/9)). Library defaults drift between
/// versions; pinning the rule keeps forecasts bit-identical for identical
/// inputs.
pub fn newey_west_lag(n_obs: usize) -> usize {
    (4.0 * ((n_obs as f64) / 100.0).powf(2.0 / 9.0)).floor() as usize
}

/// Fits cumulative_enrolled = intercept + slope * elapsed_days by OLS and
/// estimates the coefficient covariance with the Newey-West estimator
/// (Bartlett kernel, lag from `newey_west_lag`, no small-sample
/// correction).
///
/// Cumulative counts are serially correlated, so classical i.i.d.-residual
/// standard errors are not used here; they would understate forecast
/// uncertainty.
pub fn fit_trend(history: &EnrollmentHistory) -> Result<TrendFit, CtforecastErr> {
    history.validate()?;
    let obs = history.observations();
    let n = obs.len();
    let t = n as f64;

    //----------------------------------------
    // OLS point estimates
    //----------------------------------------
    let sum_x: f64 = obs.iter().map(|o| o.elapsed_days).sum();
    let sum_y: f64 = obs.iter().map(|o| o.cumulative_enrolled).sum();
    let x_bar = sum_x / t;
    let y_bar = sum_y / t;

    let sxx: f64 = obs
        .iter()
        .map(|o| (o.elapsed_days - x_bar) * (o.elapsed_days - x_bar))
        .sum();
    let sxy: f64 = obs
        .iter()
        .map(|o| (o.elapsed_days - x_bar) * (o.cumulative_enrolled - y_bar))
        .sum();
    if sxx <= 0.0 {
        return Err(ForecastComputationError::DegenerateFit.into());
    }

    let slope = sxy / sxx;
    let intercept = y_bar - slope * x_bar;

    let residuals: Vec<f64> = obs
        .iter()
        .map(|o| o.cumulative_enrolled - (intercept + slope * o.elapsed_days))
        .collect();

    //----------------------------------------
    // Newey-West covariance: Q^-1 S Q^-1 with Bartlett weights
    //----------------------------------------
    // Per-observation moment vectors u_i = e_i * (1, x_i)
    let u: Vec<(f64, f64)> = izip!(obs.iter(), residuals.iter())
        .map(|(o, e)| (*e, *e * o.elapsed_days))
        .collect();

    let lag = newey_west_lag(n).min(n - 1);
    let mut s00: f64 = u.iter().map(|(a, _)| a * a).sum();
    let mut s01: f64 = u.iter().map(|(a, b)| a * b).sum();
    let mut s11: f64 = u.iter().map(|(_, b)| b * b).sum();
    for l in 1..=lag {
        let w = 1.0 - (l as f64) / ((lag as f64) + 1.0);
        for i in l..n {
            let (a0, a1) = u[i];
            let (b0, b1) = u[i - l];
            s00 += 2.0 * w * a0 * b0;
            s01 += w * (a0 * b1 + a1 * b0);
            s11 += 2.0 * w * a1 * b1;
        }
    }

    // Q = X'X for the (1, x) design; det = t * sxx > 0 here
    let sum_x2: f64 = obs.iter().map(|o| o.elapsed_days * o.elapsed_days).sum();
    let det = t * sum_x2 - sum_x * sum_x;
    let qi00 = sum_x2 / det;
    let qi01 = -sum_x / det;
    let qi11 = t / det;

    let m00 = s00 * qi00 + s01 * qi01;
    let m10 = s01 * qi00 + s11 * qi01;
    let m01 = s00 * qi01 + s01 * qi11;
    let m11 = s01 * qi01 + s11 * qi11;
    let var_intercept = (qi00 * m00 + qi01 * m10).max(0.0);
    let cov_intercept_slope = qi00 * m01 + qi01 * m11;
    let var_slope = (qi01 * m01 + qi11 * m11).max(0.0);

    //----------------------------------------
    // Fit quality
    //----------------------------------------
    let sse: f64 = residuals.iter().map(|e| e * e).sum();
    let sst: f64 = obs
        .iter()
        .map(|o| (o.cumulative_enrolled - y_bar) * (o.cumulative_enrolled - y_bar))
        .sum();
    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 1.0 };

    Ok(TrendFit {
        intercept,
        slope,
        var_intercept,
        var_slope,
        cov_intercept_slope,
        r_squared,
        newey_west_lag: lag,
    })
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn lag_rule_values() {
        assert_eq!(newey_west_lag(4), 1);
        assert_eq!(newey_west_lag(50), 3);
        assert_eq!(newey_west_lag(100), 4);
    }

    #[test]
    fn perfect_line_recovered_exactly() {
        let history =
            EnrollmentHistory::from_series(vec![0., 30., 60., 90.], vec![0., 100., 200., 300.])
                .expect("failed to build history");
        let fit = fit_trend(&history).expect("failed to fit trend");

        assert!((fit.slope - 100. / 30.).abs() < 1e-10);
        assert!(fit.intercept.abs() < 1e-9);
        assert!(fit.var_slope < 1e-18);
        assert!(fit.var_intercept < 1e-14);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(fit.newey_west_lag, 1);
    }

    #[test]
    fn noisy_line_slope_near_truth() {
        // y = 2x with smooth, serially correlated wobble
        let days: Vec<f64> = (0..40).map(|d| d as f64).collect();
        let counts: Vec<f64> = days.iter().map(|d| 2.0 * d + 5.0 * (d / 2.5).sin()).collect();
        let history =
            EnrollmentHistory::from_series(days, counts).expect("failed to build history");
        let fit = fit_trend(&history).expect("failed to fit trend");

        assert!((fit.slope - 2.0).abs() < 0.1);
        assert!(fit.slope_se() > 0.0);
        assert!(fit.r_squared > 0.9);
    }

    #[test]
    fn flat_enrollment_zero_slope() {
        let history = EnrollmentHistory::from_series(vec![0., 10., 20., 30.], vec![50.; 4])
            .expect("failed to build history");
        let fit = fit_trend(&history).expect("failed to fit trend");
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 50.0);
    }

    #[test]
    fn predict_follows_line() {
        let history =
            EnrollmentHistory::from_series(vec![0., 30., 60., 90.], vec![10., 110., 210., 310.])
                .expect("failed to build history");
        let fit = fit_trend(&history).expect("failed to fit trend");
        assert!((fit.predict(120.) - 410.).abs() < 1e-8);
    }

    #[test]
    fn fit_is_deterministic() {
        let history =
            EnrollmentHistory::from_series(vec![0., 7., 14., 21., 28.], vec![0., 9., 15., 28., 40.])
                .expect("failed to build history");
        let a = fit_trend(&history).expect("failed to fit trend");
        let b = fit_trend(&history).expect("failed to fit trend");
        assert_eq!(a.slope.to_bits(), b.slope.to_bits());
        assert_eq!(a.var_slope.to_bits(), b.var_slope.to_bits());
    }

    #[test]
    fn short_history_rejected() {
        let history = EnrollmentHistory::from_series(vec![0., 1.], vec![0., 1.])
            .expect("failed to build history");
        assert!(fit_trend(&history).is_err());
    }
}
