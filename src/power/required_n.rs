use crate::error::CtforecastErr;
use crate::power::compute_power::compute_power;
use crate::power::error::PowerAnalysisError;
use crate::power::types::{PowerQuery, SampleSizeQuery, SampleSizeResult};
use crate::util::search::min_index_satisfying;

/// Largest per-group sample size considered before the target power is
/// declared unreachable (degenerate effect sizes near zero)
pub const MAX_N_PER_GROUP: u64 = 100_000;

/// Computes the smallest per-group sample size whose two-sample t-test
/// power meets `target_power`.
///
/// Power is monotone non-decreasing in n for fixed effect size and alpha,
/// so the minimum is found by bisection over [2, MAX_N_PER_GROUP] rather
/// than a linear scan.
pub fn compute_required_sample_size(
    query: &SampleSizeQuery,
) -> Result<SampleSizeResult, CtforecastErr> {
    let SampleSizeQuery {
        target_power,
        effect_size,
        alpha,
    } = *query;

    if !(target_power > 0.0 && target_power < 1.0) {
        return Err(PowerAnalysisError::InvalidInput {
            field: "target_power",
            value: target_power,
        }
        .into());
    }

    let power_at = |n: u64| -> Result<f64, CtforecastErr> {
        let result = compute_power(&PowerQuery {
            n_per_group: n,
            effect_size,
            alpha,
        })?;
        Ok(result.power)
    };

    // Endpoint checks double as validation of effect_size and alpha
    if power_at(2)? >= target_power {
        return Ok(SampleSizeResult { required_n: 2 });
    }
    if power_at(MAX_N_PER_GROUP)? < target_power {
        return Err(PowerAnalysisError::Unreachable {
            target_power,
            effect_size,
            alpha,
            max_n: MAX_N_PER_GROUP,
        }
        .into());
    }

    let required_n =
        min_index_satisfying(2, MAX_N_PER_GROUP, |n| Ok(power_at(n)? >= target_power))?;
    Ok(SampleSizeResult { required_n })
}
