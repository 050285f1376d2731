// ABOUTME: Integration tests for narrative compression into analysis summaries
// ABOUTME: Covers per-language findings, sentence fallback, and ellipsis truncation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{narrative_with_bottlenecks, timestamp};
use vital_insight::intelligence::SummaryBuilder;
use vital_insight::models::{
    Directive, DirectiveKind, LocalizedText, NarrativeAnalysis, SupplementRecommendation,
};

fn supplement(name: &str) -> SupplementRecommendation {
    SupplementRecommendation {
        name: name.to_owned(),
        dosage: None,
        timing: None,
    }
}

#[test]
fn test_first_two_bottlenecks_joined_per_language() {
    let analysis = narrative_with_bottlenecks(&[
        "Deep sleep consistently short",
        "HRV suppressed on training days",
        "A third finding that must be dropped",
    ]);
    let summary = SummaryBuilder::build(&analysis, Some(62), "Jordan", timestamp(2025, 8, 5));

    assert_eq!(summary.key_findings.len(), 1);
    assert_eq!(
        summary.key_findings[0].text,
        "Deep sleep consistently short. HRV suppressed on training days"
    );
    assert_eq!(summary.score, Some(62));
    assert_eq!(summary.subject_label, "Jordan");
}

#[test]
fn test_findings_kept_separately_per_language() {
    let analysis = NarrativeAnalysis {
        bottlenecks: vec![
            LocalizedText::new("en", "Recovery lagging after hard sessions"),
            LocalizedText::new("ko", "고강도 훈련 후 회복 지연"),
        ],
        ..NarrativeAnalysis::default()
    };
    let summary = SummaryBuilder::build(&analysis, None, "Jordan", timestamp(2025, 8, 5));

    assert_eq!(summary.key_findings.len(), 2);
    assert_eq!(summary.key_findings[0].lang, "en");
    assert_eq!(summary.key_findings[1].lang, "ko");
}

#[test]
fn test_blank_bottlenecks_are_skipped() {
    let analysis = narrative_with_bottlenecks(&["  ", "", "Sleep debt building"]);
    let summary = SummaryBuilder::build(&analysis, None, "Jordan", timestamp(2025, 8, 5));

    assert_eq!(summary.key_findings.len(), 1);
    assert_eq!(summary.key_findings[0].text, "Sleep debt building");
}

#[test]
fn test_fallback_to_first_summary_sentence() {
    let analysis = NarrativeAnalysis {
        summary_text: "Overall load was manageable this week. Sleep held steady.".to_owned(),
        ..NarrativeAnalysis::default()
    };
    let summary = SummaryBuilder::build(&analysis, None, "Jordan", timestamp(2025, 8, 5));

    assert_eq!(summary.key_findings.len(), 1);
    assert_eq!(summary.key_findings[0].lang, "en");
    assert_eq!(
        summary.key_findings[0].text,
        "Overall load was manageable this week"
    );
}

#[test]
fn test_no_findings_when_nothing_to_compress() {
    let summary = SummaryBuilder::build(
        &NarrativeAnalysis::default(),
        None,
        "Jordan",
        timestamp(2025, 8, 5),
    );
    assert!(summary.key_findings.is_empty());
}

#[test]
fn test_long_findings_truncated_to_197_chars_plus_ellipsis() {
    let long = "x".repeat(250);
    let analysis = narrative_with_bottlenecks(&[long.as_str()]);
    let summary = SummaryBuilder::build(&analysis, None, "Jordan", timestamp(2025, 8, 5));

    let text = &summary.key_findings[0].text;
    assert_eq!(text.chars().count(), 200);
    assert!(text.ends_with("..."));
    assert_eq!(&text[..197], "x".repeat(197).as_str());
}

#[test]
fn test_findings_at_limit_are_untouched() {
    let exact = "y".repeat(200);
    let analysis = narrative_with_bottlenecks(&[exact.as_str()]);
    let summary = SummaryBuilder::build(&analysis, None, "Jordan", timestamp(2025, 8, 5));

    assert_eq!(summary.key_findings[0].text, exact);
}

#[test]
fn test_truncation_never_splits_multibyte_characters() {
    let long = "수면".repeat(150); // 300 two-char repetitions, all multi-byte
    let analysis = NarrativeAnalysis {
        bottlenecks: vec![LocalizedText::new("ko", long)],
        ..NarrativeAnalysis::default()
    };
    let summary = SummaryBuilder::build(&analysis, None, "Jordan", timestamp(2025, 8, 5));

    let text = &summary.key_findings[0].text;
    assert_eq!(text.chars().count(), 200);
    assert!(text.ends_with("..."));
}

#[test]
fn test_directives_capped_at_three() {
    let directives: Vec<Directive> = [
        (DirectiveKind::Stop, "late caffeine"),
        (DirectiveKind::Start, "earlier wind-down"),
        (DirectiveKind::Watch, "HRV on rest days"),
        (DirectiveKind::Watch, "a fourth directive"),
    ]
    .into_iter()
    .map(|(kind, text)| Directive {
        kind,
        text: text.to_owned(),
    })
    .collect();

    let analysis = NarrativeAnalysis {
        directives,
        ..NarrativeAnalysis::default()
    };
    let summary = SummaryBuilder::build(&analysis, None, "Jordan", timestamp(2025, 8, 5));

    assert_eq!(summary.directives.len(), 3);
    assert_eq!(summary.directives[0].kind, DirectiveKind::Stop);
}

#[test]
fn test_supplements_keep_non_empty_names_in_order() {
    let analysis = NarrativeAnalysis {
        supplements: vec![
            supplement("Magnesium"),
            supplement("  "),
            supplement("Omega-3"),
        ],
        ..NarrativeAnalysis::default()
    };
    let summary = SummaryBuilder::build(&analysis, None, "Jordan", timestamp(2025, 8, 5));

    assert_eq!(summary.supplements, vec!["Magnesium", "Omega-3"]);
}
