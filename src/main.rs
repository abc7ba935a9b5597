use std::time::Instant;

use chrono::NaiveDate;

use ctforecast::compute::types::{
    CompletionProjection, EnrollmentSimSettings, ForecastQuery, PowerQuery, SampleSizeQuery,
};
use ctforecast::compute::{
    analyze_trial_power, compute_power, compute_required_sample_size, forecast_enrollment,
    generate_power_curve, sim_enrollment_history,
};

fn main() {
    //----------------------------------------
    // Power at a few sample sizes
    //----------------------------------------
    println!("Power (d = 0.5, alpha = 0.05):");
    for n in [20, 40, 64, 80, 100] {
        let result = compute_power(&PowerQuery {
            n_per_group: n,
            effect_size: 0.5,
            alpha: 0.05,
        })
        .expect("failed to compute power");
        println!("  n = {n:3} per group -> {:.1}%", result.power * 100.0);
    }

    //----------------------------------------
    // Required sample sizes
    //----------------------------------------
    println!("Required n per group for 80% power:");
    for d in [0.2, 0.5, 0.8] {
        let result = compute_required_sample_size(&SampleSizeQuery {
            target_power: 0.80,
            effect_size: d,
            alpha: 0.05,
        })
        .expect("failed to compute required sample size");
        println!("  d = {d} -> {}", result.required_n);
    }

    let start = Instant::now();
    let curve_points = generate_power_curve(200, 0.5, 0.05)
        .expect("failed to build power curve")
        .count();
    println!("Power curve ({curve_points} points): {:?}", start.elapsed());

    //----------------------------------------
    // Trial-level power assessment
    //----------------------------------------
    let analysis =
        analyze_trial_power(200, 120, 0.5, 0.05).expect("failed to analyze trial power");
    println!("Trial power analysis (target 200, actual 120): {analysis:#?}");

    //----------------------------------------
    // Forecast on a simulated trajectory
    //----------------------------------------
    let history = sim_enrollment_history(
        &EnrollmentSimSettings {
            target: 200.0,
            days_elapsed: 180,
            rate_fraction: 0.7,
            noise_std: 0.15,
        },
        24601,
    );
    let forecast = forecast_enrollment(&ForecastQuery {
        history,
        target_enrollment: 200.0,
        confidence_level: 0.95,
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
    })
    .expect("failed to forecast enrollment");

    println!(
        "Fitted trend: {:.3} patients/day (HAC se {:.3}, lag {})",
        forecast.slope, forecast.slope_se, forecast.newey_west_lag
    );
    match forecast.projection {
        CompletionProjection::Reached {
            date,
            lower,
            upper,
            days_to_target,
        } => println!(
            "Projected completion: {date} ({days_to_target:.0} days, 95% CI {lower} to {upper})"
        ),
        CompletionProjection::Unreachable => {
            println!("Target unreachable under the current trend")
        }
    }
}
