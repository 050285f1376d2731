// ABOUTME: Operational constants for memory bounds, text limits, windows, and store timing
// ABOUTME: Fixed calibration values kept stable so historical records stay comparable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

/// Persisted document schema
pub mod schema {
    /// Current memory document schema version.
    /// Any future migration logic must check the stored value before
    /// trusting the rest of the document.
    pub const CURRENT_SCHEMA_VERSION: u32 = 1;
}

/// Bounded-size limits on the per-subject memory
pub mod memory_limits {
    /// Recent analysis summaries kept, most recent first
    pub const ANALYSIS_HISTORY_LIMIT: usize = 3;

    /// Notable event strings kept, most recent first
    pub const NOTABLE_EVENT_LIMIT: usize = 5;
}

/// Text compression limits used by the summary builder and insight derivation
pub mod text_limits {
    /// Maximum characters of a compressed findings string
    pub const FINDINGS_MAX_CHARS: usize = 200;

    /// Characters kept before the ellipsis marker when findings overflow
    pub const FINDINGS_TRUNCATED_CHARS: usize = 197;

    /// Ellipsis marker appended after truncation, never split
    pub const ELLIPSIS: &str = "...";

    /// Maximum characters of a stored trend pattern sentence
    pub const TREND_MAX_CHARS: usize = 100;

    /// Minimum source length for a trend text to be considered non-trivial
    pub const TREND_MIN_SOURCE_CHARS: usize = 10;

    /// Maximum directives kept on one analysis summary
    pub const DIRECTIVE_LIMIT: usize = 3;

    /// Findings strings kept per language before joining
    pub const FINDINGS_PER_LANGUAGE: usize = 2;

    /// Minimum keyword length for persistent-weakness matching
    pub const WEAKNESS_KEYWORD_MIN_CHARS: usize = 4;

    /// Keyword matches in older findings required to classify a weakness
    pub const WEAKNESS_MATCH_THRESHOLD: usize = 2;
}

/// Trailing-window policies for baseline computation
pub mod windows {
    /// HRV baseline window (days)
    pub const HRV_BASELINE_DAYS: i64 = 14;

    /// Resting heart rate baseline window (days)
    pub const RHR_BASELINE_DAYS: i64 = 14;

    /// Sleep baseline and IQR window (days)
    pub const SLEEP_BASELINE_DAYS: i64 = 21;

    /// IQR baseline window for sleep/HRV/RHR spread (days)
    pub const IQR_BASELINE_DAYS: i64 = 21;

    /// Trailing entries compared for the short-term score trend
    pub const SCORE_TREND_ENTRIES: usize = 3;

    /// Window averaged for composite score inputs (days)
    pub const SCORE_INPUT_WINDOW_DAYS: i64 = 7;

    /// Valid VO2max samples required before publishing a range
    pub const VO2MAX_MIN_SAMPLES: usize = 2;
}

/// Store boundary timing
pub mod store {
    /// Deadline for the remote read race before falling back to cache (ms)
    pub const REMOTE_READ_TIMEOUT_MS: u64 = 2500;
}
