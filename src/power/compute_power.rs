use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::distribution::noncentral_t::noncentral_t_cdf;
use crate::error::CtforecastErr;
use crate::power::error::PowerAnalysisError;
use crate::power::types::{PowerQuery, PowerResult};

/// Computes the power of a two-sided, two-sample t-test with equal group
/// sizes, under the noncentral t sampling distribution of the test
/// statistic.
///
/// Degrees of freedom are 2 * n_per_group - 2 and the noncentrality
/// parameter is effect_size * sqrt(n_per_group / 2). Power is the
/// probability that the statistic lands in either rejection tail:
///
/// 1 - F_nct(t_crit) + F_nct(-t_crit)
///
/// As effect_size approaches 0 this tends to alpha.
pub fn compute_power(query: &PowerQuery) -> Result<PowerResult, CtforecastErr> {
    let PowerQuery {
        n_per_group,
        effect_size,
        alpha,
    } = *query;

    if n_per_group < 2 {
        return Err(PowerAnalysisError::InvalidInput {
            field: "n_per_group",
            value: n_per_group as f64,
        }
        .into());
    }
    if !effect_size.is_finite() || effect_size <= 0.0 {
        return Err(PowerAnalysisError::InvalidInput {
            field: "effect_size",
            value: effect_size,
        }
        .into());
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(PowerAnalysisError::InvalidInput {
            field: "alpha",
            value: alpha,
        }
        .into());
    }

    let df = (2 * n_per_group - 2) as f64;
    let ncp = effect_size * ((n_per_group as f64) / 2.0).sqrt();

    let central_t = StudentsT::new(0.0, 1.0, df).expect("df is at least 2");
    let t_crit = central_t.inverse_cdf(1.0 - alpha / 2.0);

    let upper_tail = 1.0 - noncentral_t_cdf(t_crit, df, ncp)?;
    let lower_tail = noncentral_t_cdf(-t_crit, df, ncp)?;

    Ok(PowerResult {
        power: (upper_tail + lower_tail).clamp(0.0, 1.0),
    })
}
