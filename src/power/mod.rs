//----------------------------------------
// power mod
//----------------------------------------
pub mod compute_power;
pub mod error;
pub mod power_curve;
pub mod required_n;
pub mod trial_power;
pub mod types;
