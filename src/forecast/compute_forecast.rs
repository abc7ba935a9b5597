use chrono::{Duration, NaiveDate};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::CtforecastErr;
use crate::forecast::error::ForecastComputationError;
use crate::forecast::ols::fit_trend;
use crate::forecast::types::{CompletionProjection, ForecastQuery, ForecastResult};

/// Two-sided standard normal quantile for a confidence level in (0, 1).
/// The normal (rather than t) quantile matches the asymptotic convention
/// of the HAC covariance estimator.
pub(crate) fn two_sided_z(confidence_level: f64) -> f64 {
    let std_normal = Normal::new(0.0, 1.0).expect("standard normal is valid");
    std_normal.inverse_cdf(1.0 - (1.0 - confidence_level) / 2.0)
}

fn offset_date(start: NaiveDate, days: f64) -> Option<NaiveDate> {
    if !days.is_finite() {
        return None;
    }
    let rounded = days.round();
    if rounded.abs() > i64::MAX as f64 {
        return None;
    }
    start.checked_add_signed(Duration::try_days(rounded as i64)?)
}

/// Projects the calendar date at which the enrollment target is reached
/// under a linear trend fitted with HAC-robust standard errors.
///
/// The fitted line intercept + slope * days is solved for the target; a
/// non-positive slope means the target is never reached under the current
/// trend, reported as `CompletionProjection::Unreachable` rather than a
/// negative or infinite day count. The confidence interval on the
/// completion date comes from the delta method applied to
/// g(b0, b1) = (target - b0) / b1 with the full coefficient covariance.
pub fn forecast_enrollment(query: &ForecastQuery) -> Result<ForecastResult, CtforecastErr> {
    let ForecastQuery {
        history,
        target_enrollment,
        confidence_level,
        start_date,
    } = query;

    // History shape problems take precedence over bad scalar parameters
    history.validate()?;
    if !target_enrollment.is_finite() || *target_enrollment <= 0.0 {
        return Err(ForecastComputationError::InvalidInput {
            field: "target_enrollment",
            value: *target_enrollment,
        }
        .into());
    }
    if !(*confidence_level > 0.0 && *confidence_level < 1.0) {
        return Err(ForecastComputationError::InvalidInput {
            field: "confidence_level",
            value: *confidence_level,
        }
        .into());
    }

    let fit = fit_trend(history)?;
    let base = ForecastResult {
        slope: fit.slope,
        intercept: fit.intercept,
        slope_se: fit.slope_se(),
        r_squared: fit.r_squared,
        newey_west_lag: fit.newey_west_lag,
        projection: CompletionProjection::Unreachable,
    };

    if fit.slope <= 0.0 {
        return Ok(base);
    }

    //----------------------------------------
    // Point projection and delta-method interval
    //----------------------------------------
    let days_to_target = (target_enrollment - fit.intercept) / fit.slope;

    // Gradient of g(b0, b1) = (target - b0) / b1
    let g0 = -1.0 / fit.slope;
    let g1 = -(target_enrollment - fit.intercept) / (fit.slope * fit.slope);
    let var_days = g0 * g0 * fit.var_intercept
        + 2.0 * g0 * g1 * fit.cov_intercept_slope
        + g1 * g1 * fit.var_slope;
    let se_days = var_days.max(0.0).sqrt();

    let z = two_sided_z(*confidence_level);
    let lower_days = (days_to_target - z * se_days).max(0.0);
    let upper_days = days_to_target + z * se_days;

    let dates = (
        offset_date(*start_date, days_to_target),
        offset_date(*start_date, lower_days),
        offset_date(*start_date, upper_days),
    );
    let projection = match dates {
        (Some(date), Some(lower), Some(upper)) => CompletionProjection::Reached {
            date,
            lower,
            upper,
            days_to_target,
        },
        // Day count too large for the calendar; treat as never reached
        _ => CompletionProjection::Unreachable,
    };

    Ok(ForecastResult { projection, ..base })
}
