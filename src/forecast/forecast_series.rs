use chrono::{Duration, NaiveDate};

use crate::error::CtforecastErr;
use crate::forecast::error::ForecastComputationError;
use crate::forecast::compute_forecast::two_sided_z;
use crate::forecast::ols::fit_trend;
use crate::forecast::types::EnrollmentHistory;

/// Headroom above target for the upper band, so charts show whether the
/// trajectory could overshoot
const UPPER_BAND_CAP: f64 = 1.2;

/// One projected day on a forecast chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSeriesPoint {
    pub day: i64,
    pub date: NaiveDate,
    /// Fitted enrollment, capped at the target
    pub expected: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Generates the projected portion of an enrollment chart: one point per
/// day after the last observation, out to `horizon_days`, with an
/// approximate confidence band from the HAC slope standard error. The
/// expected path is capped at the target, the lower band at zero, and the
/// upper band at 1.2x the target.
pub fn generate_forecast_series(
    history: &EnrollmentHistory,
    start_date: NaiveDate,
    target_enrollment: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> Result<Vec<ForecastSeriesPoint>, CtforecastErr> {
    history.validate()?;
    if !target_enrollment.is_finite() || target_enrollment <= 0.0 {
        return Err(ForecastComputationError::InvalidInput {
            field: "target_enrollment",
            value: target_enrollment,
        }
        .into());
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(ForecastComputationError::InvalidInput {
            field: "confidence_level",
            value: confidence_level,
        }
        .into());
    }

    let fit = fit_trend(history)?;
    let z = two_sided_z(confidence_level);
    let se = fit.slope_se();

    let last_day = history
        .last_day()
        .expect("validated history is non-empty")
        .floor() as i64;

    let mut series = Vec::with_capacity(horizon_days as usize);
    for offset in 1..=(horizon_days as i64) {
        let day = last_day + offset;
        let date = match Duration::try_days(day).and_then(|d| start_date.checked_add_signed(d)) {
            Some(date) => date,
            // Ran off the calendar; stop the series here
            None => break,
        };
        let d = day as f64;
        series.push(ForecastSeriesPoint {
            day,
            date,
            expected: fit.predict(d).min(target_enrollment),
            // The lower band gets the same ceiling as the expected path so
            // the band still brackets it once the line passes the target
            ci_lower: (fit.intercept + (fit.slope - z * se) * d)
                .max(0.0)
                .min(target_enrollment),
            ci_upper: (fit.intercept + (fit.slope + z * se) * d).min(target_enrollment * UPPER_BAND_CAP),
        });
    }
    Ok(series)
}

#[cfg(test)]
mod tests {

    use super::*;

    fn linear_history() -> EnrollmentHistory {
        EnrollmentHistory::from_series(vec![0., 30., 60., 90.], vec![0., 100., 200., 300.])
            .expect("failed to build history")
    }

    #[test]
    fn series_starts_after_last_observation() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        let series = generate_forecast_series(&linear_history(), start, 450., 0.95, 60)
            .expect("failed to generate series");

        assert_eq!(series.len(), 60);
        assert_eq!(series[0].day, 91);
        assert_eq!(
            series[0].date,
            NaiveDate::from_ymd_opt(2025, 4, 2).expect("valid date")
        );
    }

    #[test]
    fn expected_path_capped_at_target() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        let series = generate_forecast_series(&linear_history(), start, 450., 0.95, 120)
            .expect("failed to generate series");

        let last = series.last().expect("series should be non-empty");
        // Day 211 on a 10/3-per-day line is past the target of 450
        assert_eq!(last.expected, 450.);
        // Zero residual variance pins the whole band to the capped path
        assert_eq!(last.ci_lower, 450.);
        for point in &series {
            assert!(point.ci_lower <= point.expected + 1e-9);
            assert!(point.expected <= point.ci_upper + 1e-9);
            assert!(point.ci_upper <= 450. * 1.2 + 1e-9);
            assert!(point.ci_lower >= 0.);
        }
    }

    #[test]
    fn band_grows_with_day_on_noisy_data() {
        let days: Vec<f64> = (0..30).map(|d| d as f64).collect();
        let counts: Vec<f64> = days.iter().map(|d| 3.0 * d + 4.0 * (d / 3.0).sin()).collect();
        let history =
            EnrollmentHistory::from_series(days, counts).expect("failed to build history");
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let series = generate_forecast_series(&history, start, 10_000., 0.95, 30)
            .expect("failed to generate series");

        let first_width = series[0].ci_upper - series[0].ci_lower;
        let last_width = series[29].ci_upper - series[29].ci_lower;
        assert!(last_width > first_width);
    }

    #[test]
    fn invalid_target_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        assert!(generate_forecast_series(&linear_history(), start, -5., 0.95, 30).is_err());
    }

    #[test]
    fn short_history_rejected() {
        let history = EnrollmentHistory::from_series(vec![0., 1.], vec![0., 2.])
            .expect("failed to build history");
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        assert!(generate_forecast_series(&history, start, 100., 0.95, 30).is_err());
    }
}
