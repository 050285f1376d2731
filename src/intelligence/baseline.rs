// ABOUTME: Metric series cleaning and robust baseline statistics over trailing windows
// ABOUTME: Drops absent and implausible samples before computing average, median, and IQR
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use super::physiological_constants::plausible_ranges;
use crate::models::DailyMetricEntry;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Minimum retained samples for a meaningful inter-quartile range
const IQR_MIN_SAMPLES: usize = 4;

/// Metric selectable from a daily entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Total sleep duration (hours)
    SleepHours,
    /// Deep sleep duration (hours)
    DeepSleepHours,
    /// REM sleep duration (hours)
    RemSleepHours,
    /// Resting heart rate (bpm)
    RestingHeartRate,
    /// Heart rate variability RMSSD (ms)
    HeartRateVariability,
    /// Daily step count
    Steps,
    /// Active calorie burn (kcal)
    ActiveCalories,
    /// VO2max estimate (ml/kg/min)
    Vo2Max,
    /// Device readiness score
    Readiness,
    /// Day strain score
    Strain,
}

impl MetricKind {
    /// Inclusive plausible range for this metric; values outside are dropped
    #[must_use]
    pub const fn plausible_range(self) -> (f64, f64) {
        match self {
            Self::SleepHours => plausible_ranges::SLEEP_HOURS,
            Self::DeepSleepHours => plausible_ranges::DEEP_SLEEP_HOURS,
            Self::RemSleepHours => plausible_ranges::REM_SLEEP_HOURS,
            Self::RestingHeartRate => plausible_ranges::RESTING_HR_BPM,
            Self::HeartRateVariability => plausible_ranges::HRV_MS,
            Self::Steps => plausible_ranges::STEPS,
            Self::ActiveCalories => plausible_ranges::ACTIVE_CALORIES,
            Self::Vo2Max => plausible_ranges::VO2_MAX,
            Self::Readiness => plausible_ranges::READINESS,
            Self::Strain => plausible_ranges::STRAIN,
        }
    }

    /// Extract this metric's raw observation from an entry.
    ///
    /// An exact zero or a non-finite float models a sensor/sync gap and
    /// reads as absent, never as a true zero.
    #[must_use]
    pub fn extract(self, entry: &DailyMetricEntry) -> Option<f64> {
        let raw = match self {
            Self::SleepHours => entry.sleep_hours,
            Self::DeepSleepHours => entry.deep_sleep_hours,
            Self::RemSleepHours => entry.rem_sleep_hours,
            Self::RestingHeartRate => entry.resting_hr_bpm.map(f64::from),
            Self::HeartRateVariability => entry.hrv_ms,
            Self::Steps => entry.steps.map(f64::from),
            Self::ActiveCalories => entry.active_calories.map(f64::from),
            Self::Vo2Max => entry.vo2_max,
            Self::Readiness => entry.readiness,
            Self::Strain => entry.strain,
        };
        raw.filter(|v| v.is_finite() && *v != 0.0)
    }
}

/// Trailing window over a date-ordered metric series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWindow {
    /// Every entry in the series
    All,
    /// Entries dated within the last `n` days of the newest entry
    LastDays(i64),
    /// The `n` newest entries regardless of date
    LastEntries(usize),
}

/// Robust summary statistics for one metric over a trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBaseline {
    /// Metric the statistics describe
    pub metric: MetricKind,
    /// Arithmetic mean, absent with no samples
    pub average: Option<f64>,
    /// Median, absent with no samples
    pub median: Option<f64>,
    /// Inter-quartile range, absent below 4 samples
    pub iqr: Option<f64>,
    /// Samples retained after cleaning
    pub sample_count: usize,
}

/// Cleans metric time series and computes trailing-window statistics
pub struct BaselineEngine;

impl BaselineEngine {
    /// Clean a metric series down to valid samples inside the window.
    ///
    /// Rejects absent observations and values outside the metric's plausible
    /// range. Wrong samples are dropped, not clamped, so they cannot distort
    /// an average. `LastDays` windows anchor on the newest entry date in the
    /// series, keeping the computation pure.
    #[must_use]
    pub fn clean(
        series: &[DailyMetricEntry],
        metric: MetricKind,
        window: SampleWindow,
    ) -> Vec<f64> {
        let windowed: Vec<&DailyMetricEntry> = match window {
            SampleWindow::All => series.iter().collect(),
            SampleWindow::LastDays(days) => {
                let Some(anchor) = series.iter().map(|e| e.date).max() else {
                    return Vec::new();
                };
                let cutoff = anchor - Duration::days(days.saturating_sub(1));
                series.iter().filter(|e| e.date >= cutoff).collect()
            }
            SampleWindow::LastEntries(n) => series
                .iter()
                .skip(series.len().saturating_sub(n))
                .collect(),
        };

        let (min, max) = metric.plausible_range();
        windowed
            .into_iter()
            .filter_map(|entry| metric.extract(entry))
            .filter(|value| (min..=max).contains(value))
            .collect()
    }

    /// Arithmetic mean; undefined (not zero) for an empty slice
    #[must_use]
    pub fn average(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Median of a pre-sorted slice: middle element for odd counts, mean of
    /// the two middle elements for even counts. Caller must pre-sort.
    #[must_use]
    pub fn median(sorted: &[f64]) -> Option<f64> {
        if sorted.is_empty() {
            return None;
        }
        let len = sorted.len();
        if len % 2 == 0 {
            Some(f64::midpoint(sorted[len / 2 - 1], sorted[len / 2]))
        } else {
            Some(sorted[len / 2])
        }
    }

    /// Inter-quartile range: `Q3 - Q1` with `Q1 = sorted[n/4]` and
    /// `Q3 = sorted[3n/4]`. Undefined below 4 samples rather than a
    /// degenerate zero from too little data.
    #[must_use]
    pub fn iqr(values: &[f64]) -> Option<f64> {
        if values.len() < IQR_MIN_SAMPLES {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = sorted.len();
        let q1 = sorted[n / 4];
        let q3 = sorted[3 * n / 4];
        Some(q3 - q1)
    }

    /// Clean a series and compute all baseline statistics for one metric
    #[must_use]
    pub fn compute(
        series: &[DailyMetricEntry],
        metric: MetricKind,
        window: SampleWindow,
    ) -> MetricBaseline {
        let values = Self::clean(series, metric, window);
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        MetricBaseline {
            metric,
            average: Self::average(&values),
            median: Self::median(&sorted),
            iqr: Self::iqr(&values),
            sample_count: values.len(),
        }
    }
}
