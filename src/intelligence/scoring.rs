// ABOUTME: Composite wellness score from weighted sub-curves with partial-data renormalization
// ABOUTME: Maps scores onto five ordered tiers and detects short-term score trends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use super::physiological_constants::{
    hrv_curve, score_trend, score_weights, sleep_curve, strain_bands, tier_bounds,
};
use crate::constants::windows::SCORE_TREND_ENTRIES;
use serde::{Deserialize, Serialize};

/// Baselined inputs to the composite score, each optional
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreInputs {
    /// Readiness average, already on a 0-100 scale
    pub readiness: Option<f64>,
    /// Average sleep hours
    pub sleep_hours: Option<f64>,
    /// Average HRV RMSSD (ms)
    pub hrv_ms: Option<f64>,
    /// Average strain / load balance
    pub strain: Option<f64>,
}

/// Weighted sub-scores that produced a composite score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    /// Readiness sub-score (0-100)
    pub readiness: Option<f64>,
    /// Sleep sub-score (0-100)
    pub sleep: Option<f64>,
    /// HRV sub-score (0-100)
    pub hrv: Option<f64>,
    /// Strain sub-score (0-100)
    pub strain: Option<f64>,
}

/// Composite score result, recomputed on demand and never persisted as the
/// source of truth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Composite score 0-100; absent when no contributing metric had data
    pub score: Option<u8>,
    /// The weighted sub-scores behind the composite
    pub components: ScoreComponents,
    /// Tier for the score, absent when the score is unavailable
    pub tier: Option<Tier>,
}

/// One of five ordered score tiers partitioning `[0,100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Scores [0,25)
    Depleted,
    /// Scores [25,45)
    Strained,
    /// Scores [45,65)
    Steady,
    /// Scores [65,82)
    Energized,
    /// Scores [82,100]
    Peak,
}

impl Tier {
    /// Map a score to its tier; total over 0-100
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= tier_bounds::PEAK_MIN {
            Self::Peak
        } else if score >= tier_bounds::ENERGIZED_MIN {
            Self::Energized
        } else if score >= tier_bounds::STEADY_MIN {
            Self::Steady
        } else if score >= tier_bounds::STRAINED_MIN {
            Self::Strained
        } else {
            Self::Depleted
        }
    }

    /// Ordinal index, 0 lowest through 4 highest
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Depleted => 0,
            Self::Strained => 1,
            Self::Steady => 2,
            Self::Energized => 3,
            Self::Peak => 4,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Depleted => "Depleted",
            Self::Strained => "Strained",
            Self::Steady => "Steady",
            Self::Energized => "Energized",
            Self::Peak => "Peak",
        }
    }

    /// Color/asset identifier for presentation
    #[must_use]
    pub const fn asset_id(self) -> &'static str {
        match self {
            Self::Depleted => "tier_depleted_red",
            Self::Strained => "tier_strained_orange",
            Self::Steady => "tier_steady_yellow",
            Self::Energized => "tier_energized_green",
            Self::Peak => "tier_peak_violet",
        }
    }

    /// Inclusive score bounds of this tier
    #[must_use]
    pub const fn score_bounds(self) -> (u8, u8) {
        match self {
            Self::Depleted => (0, tier_bounds::STRAINED_MIN - 1),
            Self::Strained => (tier_bounds::STRAINED_MIN, tier_bounds::STEADY_MIN - 1),
            Self::Steady => (tier_bounds::STEADY_MIN, tier_bounds::ENERGIZED_MIN - 1),
            Self::Energized => (tier_bounds::ENERGIZED_MIN, tier_bounds::PEAK_MIN - 1),
            Self::Peak => (tier_bounds::PEAK_MIN, 100),
        }
    }

    /// Stable tier-identity hash derived from the ordinal alone.
    ///
    /// Lets a caller detect "tier changed" without comparing raw scores, so
    /// noise inside a tier never flaps downstream state. SplitMix64
    /// finalizer keeps the value stable across platforms and releases.
    #[must_use]
    pub const fn identity_hash(self) -> u64 {
        let mut z = self.ordinal() as u64 ^ 0x9e37_79b9_7f4a_7c15;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

/// Short-term score trend direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Latest score above the trailing mean
    Improving,
    /// Latest score within the stability band
    Stable,
    /// Latest score below the trailing mean
    Declining,
}

/// Multi-factor composite score calculator
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Combine the available inputs into a composite 0-100 score.
    ///
    /// Each present input contributes a sub-score through its fixed curve
    /// and weight; the weighted sum is renormalized over the present
    /// weights. The score is absent only when all four inputs are absent;
    /// it is never silently coerced to zero.
    #[must_use]
    pub fn compute(inputs: ScoreInputs) -> ScoreResult {
        let components = ScoreComponents {
            readiness: inputs.readiness.map(Self::score_readiness),
            sleep: inputs.sleep_hours.map(Self::score_sleep),
            hrv: inputs.hrv_ms.map(Self::score_hrv),
            strain: inputs.strain.map(Self::score_strain),
        };

        let weighted = [
            (components.readiness, score_weights::READINESS),
            (components.sleep, score_weights::SLEEP),
            (components.hrv, score_weights::HRV),
            (components.strain, score_weights::STRAIN),
        ];

        let mut weight_sum = 0.0;
        let mut total = 0.0;
        for (sub_score, weight) in weighted {
            if let Some(value) = sub_score {
                total += value * weight;
                weight_sum += weight;
            }
        }

        if weight_sum <= 0.0 {
            return ScoreResult {
                score: None,
                components,
                tier: None,
            };
        }

        let score = (total / weight_sum).round().clamp(0.0, 100.0) as u8;
        ScoreResult {
            score: Some(score),
            components,
            tier: Some(Tier::from_score(score)),
        }
    }

    /// Readiness is already 0-100; clamp and use directly
    #[must_use]
    pub fn score_readiness(readiness: f64) -> f64 {
        readiness.clamp(0.0, 100.0)
    }

    /// Step function over average sleep hours
    #[must_use]
    pub fn score_sleep(hours: f64) -> f64 {
        if hours >= sleep_curve::OPTIMAL_HOURS {
            sleep_curve::OPTIMAL_SCORE
        } else if hours >= sleep_curve::GOOD_HOURS {
            sleep_curve::GOOD_SCORE
        } else if hours >= sleep_curve::FAIR_HOURS {
            sleep_curve::FAIR_SCORE
        } else if hours >= sleep_curve::SHORT_HOURS {
            sleep_curve::SHORT_SCORE
        } else {
            sleep_curve::DEPRIVED_SCORE
        }
    }

    /// Linear HRV rescale, ~10 ms maps to 0 and ~80 ms to 100
    #[must_use]
    pub fn score_hrv(hrv_ms: f64) -> f64 {
        ((hrv_ms - hrv_curve::FLOOR_MS) * 100.0 / hrv_curve::SPAN_MS).clamp(0.0, 100.0)
    }

    /// Banded strain balance: optimal, acceptable, or out of band
    #[must_use]
    pub fn score_strain(strain: f64) -> f64 {
        if (strain_bands::OPTIMAL_MIN..=strain_bands::OPTIMAL_MAX).contains(&strain) {
            strain_bands::OPTIMAL_SCORE
        } else if (strain_bands::ACCEPTABLE_MIN..=strain_bands::ACCEPTABLE_MAX).contains(&strain) {
            strain_bands::ACCEPTABLE_SCORE
        } else {
            strain_bands::OUT_OF_BAND_SCORE
        }
    }

    /// Compare the newest score against the mean of up to the previous three.
    ///
    /// `scores` is most-recent-first, the order analysis history is kept in.
    /// Requires at least two scores; differences inside the stability band
    /// read as stable.
    #[must_use]
    pub fn short_term_trend(scores: &[u8]) -> Option<TrendDirection> {
        let (latest, rest) = scores.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let trailing: Vec<f64> = rest
            .iter()
            .take(SCORE_TREND_ENTRIES)
            .map(|s| f64::from(*s))
            .collect();
        let mean = trailing.iter().sum::<f64>() / trailing.len() as f64;
        let delta = f64::from(*latest) - mean;

        if delta > score_trend::STABILITY_BAND {
            Some(TrendDirection::Improving)
        } else if delta < -score_trend::STABILITY_BAND {
            Some(TrendDirection::Declining)
        } else {
            Some(TrendDirection::Stable)
        }
    }
}
