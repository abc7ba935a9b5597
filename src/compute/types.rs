//----------------------------------------
// compute mod types
//----------------------------------------

pub use crate::forecast::enrollment_sim::EnrollmentSimSettings;
pub use crate::forecast::forecast_series::ForecastSeriesPoint;
pub use crate::forecast::ols::TrendFit;
pub use crate::forecast::types::{
    CompletionProjection, EnrollmentHistory, EnrollmentObservation, ForecastQuery, ForecastResult,
};
pub use crate::power::power_curve::PowerCurve;
pub use crate::power::trial_power::TrialPowerAnalysis;
pub use crate::power::types::{
    PowerCurvePoint, PowerQuery, PowerResult, SampleSizeQuery, SampleSizeResult,
};
