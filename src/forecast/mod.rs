//----------------------------------------
// forecast mod
//----------------------------------------
pub mod compute_forecast;
pub mod enrollment_sim;
pub mod error;
pub mod forecast_series;
pub mod ols;
pub mod types;
