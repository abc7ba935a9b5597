//----------------------------------------
// Crate error type
//----------------------------------------
use thiserror::Error;

pub use crate::distribution::error::NoncentralTErr;
pub use crate::forecast::error::ForecastComputationError;
pub use crate::power::error::PowerAnalysisError;

#[derive(Error, Debug)]
pub enum CtforecastErr {
    #[error("while computing power: {0}")]
    PowerAnalysis(PowerAnalysisError),
    #[error("while forecasting enrollment: {0}")]
    ForecastCompute(ForecastComputationError),
    #[error("while evaluating noncentral t distribution: {0}")]
    NoncentralT(NoncentralTErr),
}
