use crate::error::CtforecastErr;
use crate::power::compute_power::compute_power;
use crate::power::error::PowerAnalysisError;
use crate::power::types::{PowerCurvePoint, PowerQuery};

/// Lazy power curve over per-group sample sizes n = 2..=max_n.
///
/// Parameters are validated once when the curve is constructed; each call
/// to `next` evaluates a single power. Cloning yields an independent,
/// restarted traversal.
#[derive(Debug, Clone)]
pub struct PowerCurve {
    next_n: u64,
    max_n: u64,
    effect_size: f64,
    alpha: f64,
}

impl Iterator for PowerCurve {
    type Item = PowerCurvePoint;

    fn next(&mut self) -> Option<PowerCurvePoint> {
        if self.next_n > self.max_n {
            return None;
        }
        let n = self.next_n;
        self.next_n += 1;
        let result = compute_power(&PowerQuery {
            n_per_group: n,
            effect_size: self.effect_size,
            alpha: self.alpha,
        })
        .expect("parameters were validated at curve construction");
        Some(PowerCurvePoint {
            n,
            power: result.power,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next_n > self.max_n {
            0
        } else {
            self.max_n
                .saturating_sub(self.next_n)
                .saturating_add(1)
                .min(usize::MAX as u64) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PowerCurve {}

/// Builds a power curve for n = 2..=max_n at the given effect size and
/// significance level
pub fn generate_power_curve(
    max_n: u64,
    effect_size: f64,
    alpha: f64,
) -> Result<PowerCurve, CtforecastErr> {
    if max_n < 2 {
        return Err(PowerAnalysisError::InvalidInput {
            field: "max_n",
            value: max_n as f64,
        }
        .into());
    }
    // Evaluating the first point validates effect_size and alpha up front,
    // so iteration itself cannot fail
    compute_power(&PowerQuery {
        n_per_group: 2,
        effect_size,
        alpha,
    })?;
    Ok(PowerCurve {
        next_n: 2,
        max_n,
        effect_size,
        alpha,
    })
}
