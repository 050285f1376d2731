// ABOUTME: Pure derivation of the next per-subject Memory from an analysis result
// ABOUTME: Profile refresh, bounded summary insertion, and longitudinal insight re-derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use super::baseline::{BaselineEngine, MetricKind, SampleWindow};
use super::physiological_constants::score_trend::NOTABLE_SWING_POINTS;
use super::summary::SummaryBuilder;
use crate::constants::memory_limits::{ANALYSIS_HISTORY_LIMIT, NOTABLE_EVENT_LIMIT};
use crate::constants::text_limits::{
    TREND_MAX_CHARS, TREND_MIN_SOURCE_CHARS, WEAKNESS_KEYWORD_MIN_CHARS, WEAKNESS_MATCH_THRESHOLD,
};
use crate::constants::windows::{
    HRV_BASELINE_DAYS, RHR_BASELINE_DAYS, SLEEP_BASELINE_DAYS, VO2MAX_MIN_SAMPLES,
};
use crate::models::{
    AnalysisSummary, DailyMetricEntry, FitnessLevel, LocalizedText, LongitudinalInsights, Memory,
    NarrativeAnalysis, UserProfile,
};
use chrono::{DateTime, Utc};

/// External reads injected into the otherwise pure memory derivation
#[derive(Debug, Clone, Copy)]
pub struct MemoryUpdateContext<'a> {
    /// Current subject display name, used only to fill an unset field
    pub subject_label: &'a str,
    /// Effective data source for this analysis
    pub data_source: &'a str,
    /// Current milestone label (e.g. the achievement tier name)
    pub milestone: Option<&'a str>,
    /// Recent daily metric entries, ordered by date
    pub entries: &'a [DailyMetricEntry],
    /// Injected clock; the service layer passes `Utc::now()`
    pub now: DateTime<Utc>,
}

/// Derives the next Memory from the previous one plus a completed analysis
pub struct MemoryUpdater;

impl MemoryUpdater {
    /// Derive the replacement Memory for a subject.
    ///
    /// Pure function of its inputs: bootstrap on first analysis, refresh the
    /// profile, prepend the new summary into the bounded history, re-derive
    /// longitudinal insights once at least two summaries exist, then bump
    /// the interaction metadata. The result replaces the old Memory
    /// wholesale in durable storage.
    #[must_use]
    pub fn update(
        existing: Option<Memory>,
        analysis: &NarrativeAnalysis,
        latest_score: Option<u8>,
        ctx: &MemoryUpdateContext<'_>,
    ) -> Memory {
        let mut memory = existing.unwrap_or_else(|| Memory::bootstrap(ctx.now));

        Self::refresh_profile(&mut memory.profile, latest_score, ctx);

        let summary = SummaryBuilder::build(analysis, latest_score, ctx.subject_label, ctx.now);
        memory.recent_analyses.insert(0, summary);
        memory.recent_analyses.truncate(ANALYSIS_HISTORY_LIMIT);

        if memory.recent_analyses.len() >= 2 {
            Self::derive_insights(&mut memory.insights, &memory.recent_analyses, analysis, ctx);
        }

        memory.interaction_count += 1;
        memory.last_updated_date = ctx.now;
        memory
    }

    /// Refresh slowly-changing profile fields from the current window
    fn refresh_profile(
        profile: &mut UserProfile,
        latest_score: Option<u8>,
        ctx: &MemoryUpdateContext<'_>,
    ) {
        let unnamed = profile.display_name.as_deref().map_or(true, str::is_empty);
        if unnamed && !ctx.subject_label.is_empty() {
            profile.display_name = Some(ctx.subject_label.to_owned());
        }

        profile.data_source = Some(ctx.data_source.to_owned());

        if let Some(milestone) = ctx.milestone {
            Self::track_milestone(profile, milestone);
        }

        // Numeric baselines only overwrite when the window yields data.
        let sleep = BaselineEngine::clean(
            ctx.entries,
            MetricKind::SleepHours,
            SampleWindow::LastDays(SLEEP_BASELINE_DAYS),
        );
        if let Some(avg) = BaselineEngine::average(&sleep) {
            profile.typical_sleep_hours = Some((avg * 10.0).round() / 10.0);
        }

        if let Some(median) =
            Self::window_median(ctx.entries, MetricKind::HeartRateVariability, HRV_BASELINE_DAYS)
        {
            profile.baseline_hrv_ms = Some(median.round());
        }

        if let Some(median) =
            Self::window_median(ctx.entries, MetricKind::RestingHeartRate, RHR_BASELINE_DAYS)
        {
            profile.baseline_resting_hr = Some(median.round());
        }

        let vo2 = BaselineEngine::clean(ctx.entries, MetricKind::Vo2Max, SampleWindow::All);
        if vo2.len() >= VO2MAX_MIN_SAMPLES {
            let min = vo2.iter().copied().fold(f64::INFINITY, f64::min).round();
            let max = vo2.iter().copied().fold(f64::NEG_INFINITY, f64::max).round();
            profile.vo2max_range = Some(if (max - min).abs() < f64::EPSILON {
                format!("{min:.0}")
            } else {
                format!("{min:.0}-{max:.0}")
            });
        }

        if let Some(score) = latest_score {
            profile.fitness_level = Some(FitnessLevel::from_score(score));
        }
    }

    /// Record a milestone transition in the one-way trail
    fn track_milestone(profile: &mut UserProfile, milestone: &str) {
        match profile.current_milestone.clone() {
            Some(current) if current != milestone => {
                let fragment = format!("{current} → {milestone}");
                profile.milestone_trail = Some(match profile.milestone_trail.take() {
                    Some(trail) if !trail.is_empty() => format!("{trail}; {fragment}"),
                    _ => fragment,
                });
                profile.previous_milestone = Some(current);
                profile.current_milestone = Some(milestone.to_owned());
            }
            None => profile.current_milestone = Some(milestone.to_owned()),
            Some(_) => {}
        }
    }

    /// Median of the cleaned window for one metric
    fn window_median(
        entries: &[DailyMetricEntry],
        metric: MetricKind,
        days: i64,
    ) -> Option<f64> {
        let mut values = BaselineEngine::clean(entries, metric, SampleWindow::LastDays(days));
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        BaselineEngine::median(&values)
    }

    /// Re-derive longitudinal insights from the updated history
    fn derive_insights(
        insights: &mut LongitudinalInsights,
        history: &[AnalysisSummary],
        analysis: &NarrativeAnalysis,
        ctx: &MemoryUpdateContext<'_>,
    ) {
        let newest = &history[0];

        if !newest.supplements.is_empty() {
            insights.supplement_history = Some(newest.supplements.join(", "));
        }

        // An empty recomputation keeps the previous list: staleness beats a
        // false negative from a single noisy analysis.
        let weaknesses = Self::detect_persistent_weaknesses(&analysis.bottlenecks, &history[1..]);
        if !weaknesses.is_empty() {
            insights.persistent_weaknesses = weaknesses;
        }

        let strengths: Vec<String> = analysis
            .strengths
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        if !strengths.is_empty() {
            insights.key_strengths = strengths;
        }

        if let (Some(recent), Some(previous)) = (history[0].score, history[1].score) {
            let delta = i16::from(recent) - i16::from(previous);
            if delta.abs() >= NOTABLE_SWING_POINTS {
                let direction = if delta > 0 { "improving" } else { "declining" };
                let event = format!(
                    "{}: score {direction} ({previous} → {recent})",
                    ctx.now.format("%B %Y")
                );
                insights.notable_events.insert(0, event);
                insights.notable_events.truncate(NOTABLE_EVENT_LIMIT);
            }
        }

        if let Some(sentence) = Self::pattern_sentence(&analysis.training_adjustment) {
            insights.training_trend = Some(sentence);
        }
        if let Some(sentence) = Self::pattern_sentence(&analysis.recovery_change) {
            insights.recovery_trend = Some(sentence);
        }
        if let Some(sentence) = Self::pattern_sentence(&analysis.sleep_observation) {
            insights.sleep_trend = Some(sentence);
        }
    }

    /// Bottlenecks whose keywords recur in older findings text
    fn detect_persistent_weaknesses(
        bottlenecks: &[LocalizedText],
        older: &[AnalysisSummary],
    ) -> Vec<String> {
        if older.is_empty() {
            return Vec::new();
        }

        let haystack = older
            .iter()
            .flat_map(|summary| summary.key_findings.iter())
            .map(|finding| finding.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        let mut weaknesses: Vec<String> = Vec::new();
        for bottleneck in bottlenecks {
            let text = bottleneck.text.trim();
            if text.is_empty() {
                continue;
            }
            let matches = Self::keywords(text)
                .iter()
                .filter(|keyword| haystack.contains(keyword.as_str()))
                .count();
            if matches >= WEAKNESS_MATCH_THRESHOLD && !weaknesses.iter().any(|w| w == text) {
                weaknesses.push(text.to_owned());
            }
        }
        weaknesses
    }

    /// Lower-cased, punctuation-trimmed tokens of meaningful length
    fn keywords(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut keywords: Vec<String> = Vec::new();
        for token in lowered.split_whitespace() {
            let stripped = token.trim_matches(|c: char| !c.is_alphanumeric());
            if stripped.chars().count() >= WEAKNESS_KEYWORD_MIN_CHARS
                && !keywords.iter().any(|k| k == stripped)
            {
                keywords.push(stripped.to_owned());
            }
        }
        keywords
    }

    /// First sentence of a non-trivial pattern text, bounded to 100 chars
    fn pattern_sentence(text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.chars().count() <= TREND_MIN_SOURCE_CHARS {
            return None;
        }
        let sentence = trimmed.split('.').map(str::trim).find(|s| !s.is_empty())?;
        Some(sentence.chars().take(TREND_MAX_CHARS).collect())
    }
}
