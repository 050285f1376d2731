// ABOUTME: Facade wiring metric series through scoring and analyses into memory
// ABOUTME: Computes daily composite scores and records completed analyses end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use crate::constants::windows::SCORE_INPUT_WINDOW_DAYS;
use crate::intelligence::{
    BaselineEngine, MemoryUpdateContext, MemoryUpdater, MetricKind, SampleWindow, ScoreCalculator,
    ScoreInputs, ScoreResult, Tier,
};
use crate::models::{DailyMetricEntry, Memory, NarrativeAnalysis};
use crate::store::MemoryStore;
use chrono::Utc;
use uuid::Uuid;

/// Outcome of recording one completed analysis
#[derive(Debug, Clone)]
pub struct RecordedAnalysis {
    /// The composite score computed from the metric window
    pub score: ScoreResult,
    /// The derived memory snapshot, already persisted
    pub memory: Memory,
}

/// Health insight engine tying the pure analysis core to the memory store
pub struct InsightEngine {
    store: MemoryStore,
}

impl InsightEngine {
    /// Create an engine over a memory store
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Compute the composite score from a daily metric series.
    ///
    /// Each score input is cleaned over the trailing score window and
    /// averaged before entering the weighted combination.
    #[must_use]
    pub fn daily_score(entries: &[DailyMetricEntry]) -> ScoreResult {
        let window = SampleWindow::LastDays(SCORE_INPUT_WINDOW_DAYS);
        let averaged = |metric: MetricKind| {
            let values = BaselineEngine::clean(entries, metric, window);
            BaselineEngine::average(&values)
        };

        ScoreCalculator::compute(ScoreInputs {
            readiness: averaged(MetricKind::Readiness),
            sleep_hours: averaged(MetricKind::SleepHours),
            hrv_ms: averaged(MetricKind::HeartRateVariability),
            strain: averaged(MetricKind::Strain),
        })
    }

    /// Record one completed narrative analysis for a subject.
    ///
    /// Scores the metric window, loads the existing memory (remote-preferred
    /// with cache fallback), derives the replacement memory, persists it,
    /// and returns both artifacts for the presentation collaborator. The
    /// milestone passed into the derivation is the tier label of the latest
    /// score.
    pub async fn record_analysis(
        &self,
        subject_id: Uuid,
        analysis: &NarrativeAnalysis,
        entries: &[DailyMetricEntry],
        subject_label: &str,
        data_source: &str,
    ) -> RecordedAnalysis {
        let score = Self::daily_score(entries);
        let existing = self.store.load(subject_id).await;

        let milestone = score.tier.map(Tier::label);
        let ctx = MemoryUpdateContext {
            subject_label,
            data_source,
            milestone,
            entries,
            now: Utc::now(),
        };
        let memory = MemoryUpdater::update(existing, analysis, score.score, &ctx);

        self.store.persist(subject_id, &memory);
        RecordedAnalysis { score, memory }
    }

    /// Current memory snapshot for personalization context
    pub async fn memory_snapshot(&self, subject_id: Uuid) -> Option<Memory> {
        self.store.load(subject_id).await
    }

    /// Remove the subject's memory everywhere; idempotent
    ///
    /// # Errors
    ///
    /// Returns an error when the durable-store deletion fails
    pub async fn clear_subject(&self, subject_id: Uuid) -> crate::errors::AppResult<()> {
        self.store.clear(subject_id).await
    }
}
