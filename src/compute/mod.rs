//----------------------------------------
// computation mod
//----------------------------------------
pub mod types;

pub use crate::forecast::compute_forecast::forecast_enrollment;
pub use crate::forecast::enrollment_sim::sim_enrollment_history;
pub use crate::forecast::forecast_series::generate_forecast_series;
pub use crate::forecast::ols::{fit_trend, newey_west_lag};
pub use crate::power::compute_power::compute_power;
pub use crate::power::power_curve::generate_power_curve;
pub use crate::power::required_n::{compute_required_sample_size, MAX_N_PER_GROUP};
pub use crate::power::trial_power::{analyze_trial_power, ADEQUATE_POWER};
