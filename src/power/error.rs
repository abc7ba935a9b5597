//----------------------------------------
// Power analysis errors
//----------------------------------------

use crate::error::CtforecastErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PowerAnalysisError {
    #[error("invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },
    #[error(
        "no sample size up to {max_n} per group reaches power {target_power} \
        (effect size {effect_size}, alpha {alpha})"
    )]
    Unreachable {
        target_power: f64,
        effect_size: f64,
        alpha: f64,
        max_n: u64,
    },
}

impl Into<CtforecastErr> for PowerAnalysisError {
    fn into(self) -> CtforecastErr {
        CtforecastErr::PowerAnalysis(self)
    }
}
