// ABOUTME: Core data model for daily metrics, analysis summaries, and per-subject memory
// ABOUTME: Persisted structs serialize to the camelCase JSON document layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use crate::constants::schema::CURRENT_SCHEMA_VERSION;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One calendar day of observations for a subject.
///
/// Optional fields model sensor and sync gaps. A value of exactly zero or a
/// non-finite float is treated as absent, never as a true zero; entries are
/// uniquely keyed by date within one subject's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetricEntry {
    /// Calendar date of the observations
    pub date: NaiveDate,

    /// Total sleep duration (hours)
    pub sleep_hours: Option<f64>,

    /// Deep sleep duration (hours)
    pub deep_sleep_hours: Option<f64>,

    /// REM sleep duration (hours)
    pub rem_sleep_hours: Option<f64>,

    /// Resting heart rate (bpm)
    pub resting_hr_bpm: Option<u32>,

    /// Heart rate variability RMSSD (milliseconds)
    pub hrv_ms: Option<f64>,

    /// Step count
    pub steps: Option<u32>,

    /// Active calorie burn (kcal)
    pub active_calories: Option<u32>,

    /// VO2max estimate (ml/kg/min)
    pub vo2_max: Option<f64>,

    /// Device readiness score (0-100)
    pub readiness: Option<f64>,

    /// Day strain / training load score
    pub strain: Option<f64>,
}

impl DailyMetricEntry {
    /// Create an entry with all observations absent
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            sleep_hours: None,
            deep_sleep_hours: None,
            rem_sleep_hours: None,
            resting_hr_bpm: None,
            hrv_ms: None,
            steps: None,
            active_calories: None,
            vo2_max: None,
            readiness: None,
            strain: None,
        }
    }
}

/// A short text fragment carrying its language tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Language tag (e.g. "en", "ko")
    pub lang: String,
    /// The text itself
    pub text: String,
}

impl LocalizedText {
    /// Convenience constructor
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            text: text.into(),
        }
    }
}

/// Directive kind attached to an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    /// Behavior to stop
    Stop,
    /// Behavior to start
    Start,
    /// Signal to keep watching
    Watch,
}

/// One actionable directive from a completed analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Directive kind
    pub kind: DirectiveKind,
    /// Directive text
    pub text: String,
}

/// Supplement recommendation as received from the narrative collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementRecommendation {
    /// Supplement name
    pub name: String,
    /// Suggested dosage, free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    /// Suggested timing, free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

/// Structured result of one narrative analysis, consumed read-only.
///
/// The prose itself is produced outside this engine; only structured signals
/// are extracted from it here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeAnalysis {
    /// Per-language bottleneck finding strings
    #[serde(default)]
    pub bottlenecks: Vec<LocalizedText>,
    /// Strength strings
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Free-text overall summary
    #[serde(default)]
    pub summary_text: String,
    /// Stop/start/watch directives
    #[serde(default)]
    pub directives: Vec<Directive>,
    /// Supplement recommendations
    #[serde(default)]
    pub supplements: Vec<SupplementRecommendation>,
    /// Suggested training adjustment, free text
    #[serde(default)]
    pub training_adjustment: String,
    /// Observed recovery change, free text
    #[serde(default)]
    pub recovery_change: String,
    /// Observed sleep pattern, free text
    #[serde(default)]
    pub sleep_observation: String,
}

/// Immutable compressed record of one completed analysis.
///
/// Created once per completed analysis; never mutated after creation, only
/// prepended to or evicted from the memory history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// When the analysis completed
    pub date: DateTime<Utc>,
    /// Subject label at analysis time
    pub subject_label: String,
    /// Composite health score, absent when no contributing metric had data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    /// Condensed language-tagged findings, each at most 200 characters
    #[serde(default)]
    pub key_findings: Vec<LocalizedText>,
    /// Up to three directives
    #[serde(default)]
    pub directives: Vec<Directive>,
    /// Supplement names, input order preserved
    #[serde(default)]
    pub supplements: Vec<String>,
}

/// Fitness level derived from the latest composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    /// Score below 40
    Beginner,
    /// Score 40-59
    Intermediate,
    /// Score 60-79
    Advanced,
    /// Score 80 and above
    Elite,
}

impl FitnessLevel {
    /// Fixed score bands: `<40` beginner, `<60` intermediate, `<80`
    /// advanced, otherwise elite
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        use crate::intelligence::physiological_constants::fitness_bands;

        if score < fitness_bands::INTERMEDIATE_MIN {
            Self::Beginner
        } else if score < fitness_bands::ADVANCED_MIN {
            Self::Intermediate
        } else if score < fitness_bands::ELITE_MIN {
            Self::Advanced
        } else {
            Self::Elite
        }
    }
}

/// Slowly-changing subject characteristics.
///
/// Numeric baselines only get a fresher estimate when enough new valid
/// samples exist; string and list fields are appended to, not overwritten,
/// when a tracked value changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name, filled only when currently unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Effective data source, always refreshed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    /// Typical sleep hours, 1-decimal rounded window mean
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typical_sleep_hours: Option<f64>,
    /// Baseline HRV (ms), rounded window median
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_hrv_ms: Option<f64>,
    /// Baseline resting heart rate (bpm), rounded window median
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_resting_hr: Option<f64>,
    /// VO2max range string, "min" or "min-max"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vo2max_range: Option<String>,
    /// Derived fitness level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<FitnessLevel>,
    /// Known condition tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
    /// Current milestone label (e.g. an achievement tier name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_milestone: Option<String>,
    /// Previous milestone label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_milestone: Option<String>,
    /// One-way append log of milestone transitions, never rewritten
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_trail: Option<String>,
}

/// Derived longitudinal insight state, re-derived on every analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongitudinalInsights {
    /// Sleep trend description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_trend: Option<String>,
    /// Recovery trend description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_trend: Option<String>,
    /// Training trend description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_trend: Option<String>,
    /// Key strengths
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_strengths: Vec<String>,
    /// Persistent weaknesses detected across analyses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persistent_weaknesses: Vec<String>,
    /// Supplement history string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplement_history: Option<String>,
    /// Notable events, most recent first, capped at 5
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notable_events: Vec<String>,
}

/// The durable per-subject aggregate: profile, bounded analysis history, and
/// derived insights.
///
/// Every analysis derives a new `Memory` that replaces the old one wholesale
/// in durable storage; the engine alone is responsible for copying unrelated
/// fields forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    /// Schema version, checked before trusting the document shape
    pub schema_version: u32,
    /// Stable subject characteristics
    pub profile: UserProfile,
    /// Derived longitudinal insights
    pub insights: LongitudinalInsights,
    /// Recent analysis summaries, most recent first, capped at 3
    #[serde(default)]
    pub recent_analyses: Vec<AnalysisSummary>,
    /// Number of completed analyses recorded
    pub interaction_count: u32,
    /// When the first analysis was recorded
    pub first_analysis_date: DateTime<Utc>,
    /// When this memory was last derived
    pub last_updated_date: DateTime<Utc>,
}

impl Memory {
    /// Create an empty memory for a subject's first analysis
    #[must_use]
    pub fn bootstrap(now: DateTime<Utc>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            profile: UserProfile::default(),
            insights: LongitudinalInsights::default(),
            recent_analyses: Vec::new(),
            interaction_count: 0,
            first_analysis_date: now,
            last_updated_date: now,
        }
    }

    /// Whether this document's schema version can be trusted by this build
    #[must_use]
    pub const fn is_supported_schema(&self) -> bool {
        self.schema_version <= CURRENT_SCHEMA_VERSION
    }
}
