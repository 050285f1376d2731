// ABOUTME: Fixed physiological calibration constants for cleaning and scoring
// ABOUTME: Plausible ranges, score curves, weights, tier bounds, fitness bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

//! Physiological calibration constants.
//!
//! These values are fixed domain calibration, reproduced exactly across
//! releases so historical scores stay comparable. They are not tunable
//! defaults.

/// Plausible value ranges per metric, inclusive on both ends.
///
/// A sample outside its range is dropped before statistics are computed,
/// never clamped. Ranges are deliberately generous: they reject impossible
/// sensor readings, not unusual humans.
///
/// References:
/// - Hirshkowitz, M., et al. (2015). National Sleep Foundation's sleep time
///   duration recommendations. *Sleep Health*, 1(1), 40-43.
/// - Shaffer, F., & Ginsberg, J.P. (2017). An Overview of Heart Rate
///   Variability Metrics and Norms. *Frontiers in Public Health*, 5, 258.
pub mod plausible_ranges {
    /// Total sleep duration (hours)
    pub const SLEEP_HOURS: (f64, f64) = (2.0, 14.0);

    /// Deep sleep duration (hours)
    pub const DEEP_SLEEP_HOURS: (f64, f64) = (0.25, 6.0);

    /// REM sleep duration (hours)
    pub const REM_SLEEP_HOURS: (f64, f64) = (0.25, 5.0);

    /// Resting heart rate (bpm)
    pub const RESTING_HR_BPM: (f64, f64) = (35.0, 100.0);

    /// Heart rate variability RMSSD (ms)
    pub const HRV_MS: (f64, f64) = (15.0, 150.0);

    /// Daily step count
    pub const STEPS: (f64, f64) = (500.0, 80_000.0);

    /// Active calorie burn (kcal)
    pub const ACTIVE_CALORIES: (f64, f64) = (50.0, 5_000.0);

    /// VO2max estimate (ml/kg/min)
    pub const VO2_MAX: (f64, f64) = (20.0, 90.0);

    /// Device readiness score
    pub const READINESS: (f64, f64) = (0.0, 100.0);

    /// Day strain score
    pub const STRAIN: (f64, f64) = (0.0, 21.0);
}

/// Composite score sub-factor weights. Present inputs are renormalized over
/// the sum of their weights so missing inputs never bias the score down.
pub mod score_weights {
    /// Readiness weight
    pub const READINESS: f64 = 0.40;

    /// Sleep duration weight
    pub const SLEEP: f64 = 0.25;

    /// HRV weight
    pub const HRV: f64 = 0.20;

    /// Strain / load balance weight
    pub const STRAIN: f64 = 0.15;
}

/// Step function mapping average sleep hours to a sub-score
pub mod sleep_curve {
    /// Hours at or above which sleep scores 100
    pub const OPTIMAL_HOURS: f64 = 7.5;
    /// Sub-score for optimal sleep
    pub const OPTIMAL_SCORE: f64 = 100.0;

    /// Hours at or above which sleep scores 85
    pub const GOOD_HOURS: f64 = 7.0;
    /// Sub-score for good sleep
    pub const GOOD_SCORE: f64 = 85.0;

    /// Hours at or above which sleep scores 60
    pub const FAIR_HOURS: f64 = 6.0;
    /// Sub-score for fair sleep
    pub const FAIR_SCORE: f64 = 60.0;

    /// Hours at or above which sleep scores 35
    pub const SHORT_HOURS: f64 = 5.0;
    /// Sub-score for short sleep
    pub const SHORT_SCORE: f64 = 35.0;

    /// Sub-score below the short-sleep threshold
    pub const DEPRIVED_SCORE: f64 = 15.0;
}

/// Linear rescale anchors for the HRV sub-score:
/// `clamp((hrv - FLOOR_MS) * 100 / SPAN_MS, 0, 100)`,
/// calibrated so ~10 ms maps to 0 and ~80 ms maps to 100.
pub mod hrv_curve {
    /// HRV value mapping to sub-score 0 (ms)
    pub const FLOOR_MS: f64 = 10.0;

    /// Span over which the sub-score climbs to 100 (ms)
    pub const SPAN_MS: f64 = 70.0;
}

/// Banded strain / load-balance sub-scores
pub mod strain_bands {
    /// Lower bound of the optimal band
    pub const OPTIMAL_MIN: f64 = 3.0;
    /// Upper bound of the optimal band
    pub const OPTIMAL_MAX: f64 = 6.0;
    /// Sub-score inside the optimal band
    pub const OPTIMAL_SCORE: f64 = 85.0;

    /// Lower bound of the acceptable band
    pub const ACCEPTABLE_MIN: f64 = 2.0;
    /// Upper bound of the acceptable band
    pub const ACCEPTABLE_MAX: f64 = 7.0;
    /// Sub-score inside the acceptable band
    pub const ACCEPTABLE_SCORE: f64 = 65.0;

    /// Sub-score outside both bands, too high or too low
    pub const OUT_OF_BAND_SCORE: f64 = 40.0;
}

/// Tier partition of the score range: `[0,25) [25,45) [45,65) [65,82) [82,100]`
pub mod tier_bounds {
    /// First score of the second tier
    pub const STRAINED_MIN: u8 = 25;

    /// First score of the third tier
    pub const STEADY_MIN: u8 = 45;

    /// First score of the fourth tier
    pub const ENERGIZED_MIN: u8 = 65;

    /// First score of the top tier
    pub const PEAK_MIN: u8 = 82;
}

/// Fitness-level bands over the latest composite score
pub mod fitness_bands {
    /// First score of the intermediate band
    pub const INTERMEDIATE_MIN: u8 = 40;

    /// First score of the advanced band
    pub const ADVANCED_MIN: u8 = 60;

    /// First score of the elite band
    pub const ELITE_MIN: u8 = 80;
}

/// Score trend and notable-event thresholds
pub mod score_trend {
    /// Band around the trailing mean within which the trend reads stable
    pub const STABILITY_BAND: f64 = 3.0;

    /// Absolute score swing between consecutive analyses that logs an event
    pub const NOTABLE_SWING_POINTS: i16 = 5;
}
