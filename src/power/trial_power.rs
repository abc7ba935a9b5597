use crate::error::CtforecastErr;
use crate::power::compute_power::compute_power;
use crate::power::required_n::compute_required_sample_size;
use crate::power::types::{PowerQuery, SampleSizeQuery};

/// Conventional minimum acceptable power for a confirmatory trial
pub const ADEQUATE_POWER: f64 = 0.80;

#[derive(Debug, Clone, Copy)]
pub struct TrialPowerAnalysis {
    pub n_per_group_target: u64,
    pub n_per_group_actual: u64,
    pub power_at_target: f64,
    pub power_at_actual: f64,
    /// power_at_target - power_at_actual
    pub power_gap: f64,
    pub is_underpowered: bool,
    /// Per-group n needed for 80% power at this effect size and alpha
    pub recommended_n_per_group: u64,
    /// Additional patients (total, both arms) needed to reach the
    /// recommended enrollment; zero when already there
    pub enrollment_shortfall: u64,
}

/// Assesses a trial's power at its current and target enrollment levels,
/// assuming 1:1 allocation (n per group = total enrollment / 2).
pub fn analyze_trial_power(
    enrollment_target: u64,
    enrollment_actual: u64,
    effect_size: f64,
    alpha: f64,
) -> Result<TrialPowerAnalysis, CtforecastErr> {
    let n_per_group_target = enrollment_target / 2;
    let n_per_group_actual = enrollment_actual / 2;

    let power_at_target = compute_power(&PowerQuery {
        n_per_group: n_per_group_target,
        effect_size,
        alpha,
    })?
    .power;
    let power_at_actual = compute_power(&PowerQuery {
        n_per_group: n_per_group_actual,
        effect_size,
        alpha,
    })?
    .power;

    let recommended = compute_required_sample_size(&SampleSizeQuery {
        target_power: ADEQUATE_POWER,
        effect_size,
        alpha,
    })?;

    Ok(TrialPowerAnalysis {
        n_per_group_target,
        n_per_group_actual,
        power_at_target,
        power_at_actual,
        power_gap: power_at_target - power_at_actual,
        is_underpowered: power_at_actual < ADEQUATE_POWER,
        recommended_n_per_group: recommended.required_n,
        enrollment_shortfall: (2 * recommended.required_n).saturating_sub(enrollment_actual),
    })
}
