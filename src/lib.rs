//----------------------------------------
// Root lib
//----------------------------------------
//! The purpose of this library is to provide utility functions for computing
//! statistical power, required sample sizes, and enrollment completion
//! forecasts for two-arm clinical trials. Power calculations model a
//! two-sample t-test via the noncentral t distribution; enrollment forecasts
//! fit a linear trend by OLS with Newey-West (HAC) robust standard errors.

/// This module houses the public API for power analysis and enrollment
/// forecasting
pub mod compute;
mod distribution;
/// This module contains error types
pub mod error;
mod forecast;
mod power;
mod util;
