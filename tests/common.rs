// ABOUTME: Shared test fixtures and setup for integration tests
// ABOUTME: Provides quiet logging init, date helpers, and sample data builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::must_use_candidate,
    clippy::missing_panics_doc
)]
#![allow(missing_docs)]

//! Shared test utilities for `vital_insight` integration tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::Once;
use vital_insight::models::{AnalysisSummary, DailyMetricEntry, LocalizedText, NarrativeAnalysis};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Midnight-UTC timestamp shorthand
pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Entry with only a sleep observation
pub fn entry_with_sleep(day: NaiveDate, hours: f64) -> DailyMetricEntry {
    DailyMetricEntry {
        sleep_hours: Some(hours),
        ..DailyMetricEntry::empty(day)
    }
}

/// Entry with plausible values across the score inputs
pub fn full_entry(day: NaiveDate) -> DailyMetricEntry {
    DailyMetricEntry {
        sleep_hours: Some(7.6),
        deep_sleep_hours: Some(1.4),
        rem_sleep_hours: Some(1.8),
        resting_hr_bpm: Some(52),
        hrv_ms: Some(62.0),
        steps: Some(9_500),
        active_calories: Some(640),
        vo2_max: Some(48.0),
        readiness: Some(80.0),
        strain: Some(4.5),
        ..DailyMetricEntry::empty(day)
    }
}

/// A run of consecutive fully-populated entries ending on `last_day`
pub fn entry_run(last_day: NaiveDate, count: i64) -> Vec<DailyMetricEntry> {
    (0..count)
        .rev()
        .map(|back| full_entry(last_day - chrono::Duration::days(back)))
        .collect()
}

/// Narrative analysis with English bottlenecks only
pub fn narrative_with_bottlenecks(bottlenecks: &[&str]) -> NarrativeAnalysis {
    NarrativeAnalysis {
        bottlenecks: bottlenecks
            .iter()
            .map(|text| LocalizedText::new("en", *text))
            .collect(),
        ..NarrativeAnalysis::default()
    }
}

/// Minimal analysis summary with one English finding
pub fn summary_with_finding(
    when: DateTime<Utc>,
    score: Option<u8>,
    finding: &str,
) -> AnalysisSummary {
    AnalysisSummary {
        date: when,
        subject_label: "Test Subject".to_owned(),
        score,
        key_findings: vec![LocalizedText::new("en", finding)],
        directives: Vec::new(),
        supplements: Vec::new(),
    }
}
