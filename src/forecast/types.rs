use chrono::NaiveDate;

use crate::error::CtforecastErr;
use crate::forecast::error::ForecastComputationError;

/// A single point on a cumulative enrollment trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrollmentObservation {
    /// Days since trial start
    pub elapsed_days: f64,
    pub cumulative_enrolled: f64,
}

/// Ordered cumulative enrollment trajectory. Shape requirements (at least
/// 3 observations, strictly increasing elapsed days) are checked by the
/// engines that consume the history, not at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentHistory {
    observations: Vec<EnrollmentObservation>,
}

impl EnrollmentHistory {
    pub fn new(observations: Vec<EnrollmentObservation>) -> Self {
        EnrollmentHistory { observations }
    }

    /// Builds a history from parallel day/count series
    pub fn from_series(
        elapsed_days: Vec<f64>,
        cumulative_enrolled: Vec<f64>,
    ) -> Result<Self, CtforecastErr> {
        if elapsed_days.len() != cumulative_enrolled.len() {
            return Err(ForecastComputationError::MismatchedSeries {
                days_length: elapsed_days.len(),
                counts_length: cumulative_enrolled.len(),
            }
            .into());
        }
        let observations = elapsed_days
            .into_iter()
            .zip(cumulative_enrolled)
            .map(|(elapsed_days, cumulative_enrolled)| EnrollmentObservation {
                elapsed_days,
                cumulative_enrolled,
            })
            .collect();
        Ok(EnrollmentHistory { observations })
    }

    pub fn observations(&self) -> &[EnrollmentObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last_day(&self) -> Option<f64> {
        self.observations.last().map(|obs| obs.elapsed_days)
    }

    /// Checks the shape requirements for regression: at least 3 points,
    /// finite non-negative values, non-degenerate and strictly increasing
    /// elapsed days. The degeneracy
    /// check runs before the ordering check so that an all-identical-days
    /// history reports a degenerate fit rather than an ordering problem.
    pub fn validate(&self) -> Result<(), CtforecastErr> {
        if self.observations.len() < 3 {
            return Err(ForecastComputationError::InsufficientData {
                n_obs: self.observations.len(),
            }
            .into());
        }
        for obs in &self.observations {
            if !obs.elapsed_days.is_finite() || obs.elapsed_days < 0.0 {
                return Err(ForecastComputationError::InvalidInput {
                    field: "elapsed_days",
                    value: obs.elapsed_days,
                }
                .into());
            }
            if !obs.cumulative_enrolled.is_finite() || obs.cumulative_enrolled < 0.0 {
                return Err(ForecastComputationError::InvalidInput {
                    field: "cumulative_enrolled",
                    value: obs.cumulative_enrolled,
                }
                .into());
            }
        }
        let first_day = self.observations[0].elapsed_days;
        if self
            .observations
            .iter()
            .all(|obs| obs.elapsed_days == first_day)
        {
            return Err(ForecastComputationError::DegenerateFit.into());
        }
        for (i, pair) in self.observations.windows(2).enumerate() {
            if pair[1].elapsed_days <= pair[0].elapsed_days {
                return Err(ForecastComputationError::NonIncreasingDays { index: i + 1 }.into());
            }
        }
        Ok(())
    }
}

/// Inputs for a completion-date forecast
#[derive(Debug, Clone)]
pub struct ForecastQuery {
    pub history: EnrollmentHistory,
    pub target_enrollment: f64,
    /// Two-sided confidence level for the completion interval, in (0, 1)
    pub confidence_level: f64,
    /// Calendar date corresponding to elapsed day 0
    pub start_date: NaiveDate,
}

/// Completion projection under the fitted trend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionProjection {
    Reached {
        date: NaiveDate,
        lower: NaiveDate,
        upper: NaiveDate,
        days_to_target: f64,
    },
    /// The fitted slope is non-positive (or the projected day count does
    /// not map to a representable date): the target is never reached under
    /// the current trend
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastResult {
    pub slope: f64,
    pub intercept: f64,
    /// Newey-West robust standard error of the slope
    pub slope_se: f64,
    pub r_squared: f64,
    /// Truncation lag used by the HAC estimator
    pub newey_west_lag: usize,
    pub projection: CompletionProjection,
}
