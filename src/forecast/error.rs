//----------------------------------------
// Forecast errors
//----------------------------------------

use crate::error::CtforecastErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastComputationError {
    #[error("insufficient data: need at least 3 observations, got {n_obs}")]
    InsufficientData { n_obs: usize },
    #[error(
        "insufficient data: elapsed days should be strictly increasing \
        (violated at index {index})"
    )]
    NonIncreasingDays { index: usize },
    #[error("degenerate fit: elapsed days have zero variance")]
    DegenerateFit,
    #[error("invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },
    #[error(
        "lengths of elapsed days and enrollment counts don't match \
        (days length {days_length}, counts length {counts_length})"
    )]
    MismatchedSeries {
        days_length: usize,
        counts_length: usize,
    },
}

impl Into<CtforecastErr> for ForecastComputationError {
    fn into(self) -> CtforecastErr {
        CtforecastErr::ForecastCompute(self)
    }
}
