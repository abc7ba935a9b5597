//----------------------------------------
// power mod types
//----------------------------------------

/// Inputs for a single two-sample t-test power evaluation. Total trial
/// enrollment under 1:1 allocation is 2 * n_per_group.
#[derive(Debug, Clone, Copy)]
pub struct PowerQuery {
    pub n_per_group: u64,
    /// Cohen's d (standardized mean difference)
    pub effect_size: f64,
    /// Two-sided significance level
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerResult {
    /// Probability of rejecting the null under the alternative, in [0, 1]
    pub power: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct SampleSizeQuery {
    pub target_power: f64,
    pub effect_size: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSizeResult {
    /// Smallest per-group n whose power meets the target
    pub required_n: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerCurvePoint {
    pub n: u64,
    pub power: f64,
}
