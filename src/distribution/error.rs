//----------------------------------------
// Noncentral t errors
//----------------------------------------

use crate::error::CtforecastErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoncentralTErr {
    #[error("degrees of freedom should be positive; got {df}")]
    BadDegreesOfFreedom { df: f64 },
}

impl Into<CtforecastErr> for NoncentralTErr {
    fn into(self) -> CtforecastErr {
        CtforecastErr::NoncentralT(self)
    }
}
