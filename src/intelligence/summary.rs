// ABOUTME: Compresses a completed narrative analysis into an immutable AnalysisSummary
// ABOUTME: Per-language findings compression with bounded ellipsis truncation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use crate::constants::text_limits::{
    DIRECTIVE_LIMIT, ELLIPSIS, FINDINGS_MAX_CHARS, FINDINGS_PER_LANGUAGE, FINDINGS_TRUNCATED_CHARS,
};
use crate::models::{AnalysisSummary, LocalizedText, NarrativeAnalysis};
use chrono::{DateTime, Utc};

/// Language tag used for the fallback finding compressed from the free-text
/// summary
const FALLBACK_LANG: &str = "en";

/// Builds immutable analysis summaries from narrative results
pub struct SummaryBuilder;

impl SummaryBuilder {
    /// Compress one completed narrative analysis into a summary record.
    ///
    /// Per language tag, the first two non-empty trimmed bottleneck strings
    /// are joined with `". "`; when no bottleneck text exists in any
    /// language, the first sentence of the free-text summary stands in.
    /// The output is immutable once built.
    #[must_use]
    pub fn build(
        analysis: &NarrativeAnalysis,
        score: Option<u8>,
        subject_label: &str,
        date: DateTime<Utc>,
    ) -> AnalysisSummary {
        AnalysisSummary {
            date,
            subject_label: subject_label.to_owned(),
            score,
            key_findings: Self::compress_findings(&analysis.bottlenecks, &analysis.summary_text),
            directives: analysis.directives.iter().take(DIRECTIVE_LIMIT).cloned().collect(),
            supplements: analysis
                .supplements
                .iter()
                .map(|s| s.name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Compress per-language bottleneck strings into one bounded findings
    /// string per language
    fn compress_findings(
        bottlenecks: &[LocalizedText],
        summary_text: &str,
    ) -> Vec<LocalizedText> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for bottleneck in bottlenecks {
            let text = bottleneck.text.trim();
            if text.is_empty() {
                continue;
            }
            match groups.iter_mut().find(|(lang, _)| *lang == bottleneck.lang) {
                Some((_, parts)) => {
                    if parts.len() < FINDINGS_PER_LANGUAGE {
                        parts.push(text.to_owned());
                    }
                }
                None => groups.push((bottleneck.lang.clone(), vec![text.to_owned()])),
            }
        }

        let mut findings: Vec<LocalizedText> = groups
            .into_iter()
            .map(|(lang, parts)| LocalizedText::new(lang, parts.join(". ")))
            .collect();

        if findings.is_empty() {
            if let Some(sentence) = Self::first_sentence(summary_text) {
                findings.push(LocalizedText::new(FALLBACK_LANG, sentence));
            }
        }

        for finding in &mut findings {
            finding.text = Self::truncate_finding(&finding.text);
        }
        findings
    }

    /// First sentence of a longer summary string, split on `.`
    fn first_sentence(text: &str) -> Option<String> {
        text.split('.')
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_owned)
    }

    /// Ellipsis-truncate a findings string past the 200-character limit.
    ///
    /// Truncation is character-based so a multi-byte character is never
    /// split, and the ellipsis marker is appended whole after the cut.
    fn truncate_finding(text: &str) -> String {
        if text.chars().count() <= FINDINGS_MAX_CHARS {
            return text.to_owned();
        }
        let mut truncated: String = text.chars().take(FINDINGS_TRUNCATED_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    }
}
