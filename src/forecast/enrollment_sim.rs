use rand::{distributions::Distribution, rngs, SeedableRng};
use statrs::distribution::{Normal, Poisson};

use crate::forecast::types::{EnrollmentHistory, EnrollmentObservation};

/// Floor on the daily Poisson rate so the generator never stalls entirely
const MIN_DAILY_RATE: f64 = 0.1;
/// On-schedule trials are assumed to reach target in about 1.5 years
const ON_SCHEDULE_DAYS: f64 = 547.0;

#[derive(Debug, Clone, Copy)]
pub struct EnrollmentSimSettings {
    pub target: f64,
    pub days_elapsed: u32,
    /// Fraction of the on-schedule daily rate actually achieved
    /// (1.0 = on track, below 1.0 = recruiting slowly)
    pub rate_fraction: f64,
    /// Day-to-day rate noise as a fraction of the mean rate
    pub noise_std: f64,
}

/// Simulates a daily cumulative enrollment trajectory: Poisson counts
/// around a linear trend with multiplicative rate noise, cumulative total
/// capped at the target. Deterministic for a given seed.
pub fn sim_enrollment_history(settings: &EnrollmentSimSettings, seed: u64) -> EnrollmentHistory {
    let EnrollmentSimSettings {
        target,
        days_elapsed,
        rate_fraction,
        noise_std,
    } = *settings;

    let mean_rate = (target / ON_SCHEDULE_DAYS) * rate_fraction;

    //----------------------------------------
    // Simulate daily arrivals
    //----------------------------------------
    let mut rng = rngs::StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).expect("standard normal is valid");

    let mut cumulative = 0.0;
    let observations = (0..=days_elapsed)
        .map(|d| {
            if d > 0 && cumulative < target {
                let lambda = (mean_rate * (1.0 + noise_std * noise.sample(&mut rng)))
                    .max(MIN_DAILY_RATE);
                let arrivals = Poisson::new(lambda)
                    .expect("lambda is positive")
                    .sample(&mut rng);
                cumulative = (cumulative + arrivals).min(target);
            }
            EnrollmentObservation {
                elapsed_days: d as f64,
                cumulative_enrolled: cumulative,
            }
        })
        .collect();

    EnrollmentHistory::new(observations)
}
