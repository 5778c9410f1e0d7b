//! End-to-end tests for the term tracker.
//!
//! These exercise the full path across crates: JSON fixture → in-memory
//! store → sync adapter → tracker → extraction → normalization → stemming →
//! close-match ranking.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lessonterms::prelude::*;
use lessonterms::{
    Cx, LessonId, MetadataRow, StemSet, TermFuture, extract, is_close_match, normalize_term,
    rank_metadata_terms,
};
use serde_json::json;

// ═══════════════════════════════════════════════════════════════════════════
// Test helpers
// ═══════════════════════════════════════════════════════════════════════════

const FIXTURE: &str = r#"[
    {"id": "ll-1", "project_type_id": "construction",
     "metadata": ["Cost Overrun", "Permits"]},
    {"id": "ll-2", "project_type_id": "construction",
     "metadata": {"tags": ["cost-overrun", "Schedule Delay"], "severity": 3}},
    {"id": "ll-3", "project_type_id": "construction",
     "metadata": {"notes": {"root_cause": ["COST OVERRUN", "vendor delays"]}}},
    {"id": "ll-4", "project_type_id": "construction", "organization_id": "org-9",
     "metadata": ["Private Tag", "Private Tag", "Private Tag"]},
    {"id": "ll-5", "project_type_id": "software",
     "metadata": ["scope creep"]},
    {"id": "ll-6", "project_type_id": "construction", "metadata": null}
]"#;

fn identity_tracker(store: InMemoryLessonStore) -> TermTracker {
    TermTracker::from_sync(store, Arc::new(IdentityStemmer))
}

/// Source that counts calls and serves fixed data.
struct CountingSource {
    ids: Vec<LessonId>,
    id_calls: AtomicUsize,
    metadata_calls: AtomicUsize,
}

impl CountingSource {
    fn new(ids: Vec<LessonId>) -> Self {
        Self {
            ids,
            id_calls: AtomicUsize::new(0),
            metadata_calls: AtomicUsize::new(0),
        }
    }
}

impl LessonSource for CountingSource {
    fn lesson_ids_for_project_type<'a>(
        &'a self,
        _cx: &'a Cx,
        _project_type_id: &'a str,
    ) -> TermFuture<'a, Vec<LessonId>> {
        Box::pin(async move {
            self.id_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.ids.clone())
        })
    }

    fn metadata_for_lessons<'a>(
        &'a self,
        _cx: &'a Cx,
        lesson_ids: &'a [LessonId],
    ) -> TermFuture<'a, Vec<MetadataRow>> {
        Box::pin(async move {
            self.metadata_calls.fetch_add(1, Ordering::SeqCst);
            Ok(lesson_ids
                .iter()
                .map(|id| MetadataRow::new(MetadataValue::tags(["budget"])).with_lesson_id(id.clone()))
                .collect())
        })
    }

    fn id(&self) -> &'static str {
        "counting"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 1. Fixture → tracker end to end
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn fixture_ranks_shared_construction_terms() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let store = InMemoryLessonStore::from_json_str(FIXTURE).expect("fixture");
        let tracker = identity_tracker(store);

        let (top, metrics) = tracker
            .top_terms_collect(&cx, "construction", 10)
            .await
            .expect("rank");

        assert_eq!(top[0].term, "cost overrun");
        assert_eq!(top[0].exact_count, 3);
        // Organization-owned lessons never contribute.
        assert!(top.iter().all(|e| e.term != "private tag"));
        // Mapping keys never become terms.
        assert!(top.iter().all(|e| e.term != "tags" && e.term != "root_cause"));
        // Numbers are stringified.
        assert!(top.iter().any(|e| e.term == "3"));

        assert_eq!(metrics.lesson_count, 4);
        assert_eq!(metrics.row_count, 4);
        assert_eq!(metrics.raw_term_count, 7);
        assert_eq!(metrics.returned, top.len());
    });
}

#[test]
fn other_project_types_are_isolated() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let store = InMemoryLessonStore::from_json_str(FIXTURE).expect("fixture");
        let tracker = identity_tracker(store);

        let top = tracker.top_terms(&cx, "software", 10).await.expect("rank");
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].term, "scope creep");
        assert_eq!(top[0].exact_count, 1);
    });
}

#[test]
fn unknown_project_type_yields_empty_list() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let store = InMemoryLessonStore::from_json_str(FIXTURE).expect("fixture");
        let tracker = identity_tracker(store);
        assert!(tracker.top_terms(&cx, "aerospace", 10).await.expect("rank").is_empty());
    });
}

#[cfg(feature = "porter")]
#[test]
fn porter_stemmer_links_inflected_tags() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let store = InMemoryLessonStore::new()
            .add_lesson(LessonRecord::shared(
                "ll-1",
                "construction",
                MetadataValue::tags(["Schedule Delays", "schedule delay", "Permits"]),
            ))
            .add_lesson(LessonRecord::shared(
                "ll-2",
                "construction",
                MetadataValue::tags(["permit"]),
            ));
        let tracker = TermTracker::from_sync(store, Arc::new(PorterStemmer::english()));

        let top = tracker.top_terms(&cx, "construction", 10).await.expect("rank");
        let delays = top.iter().find(|e| e.term == "schedule delays").expect("delays");
        let permit = top.iter().find(|e| e.term == "permit").expect("permit");
        assert_eq!((delays.exact_count, delays.close_count), (1, 1));
        assert_eq!((permit.exact_count, permit.close_count), (1, 1));
    });
}

// ═══════════════════════════════════════════════════════════════════════════
// 2. Short-circuit behavior (call-count assertions)
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn empty_project_type_makes_zero_source_calls() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let source = Arc::new(CountingSource::new(vec![LessonId::new("ll-1")]));
        let tracker = TermTracker::new(source.clone(), Arc::new(IdentityStemmer));

        assert!(tracker.top_terms(&cx, "", 10).await.expect("rank").is_empty());
        assert!(tracker.top_terms_default(&cx, "  ").await.expect("rank").is_empty());
        assert_eq!(source.id_calls.load(Ordering::SeqCst), 0);
        assert_eq!(source.metadata_calls.load(Ordering::SeqCst), 0);
    });
}

#[test]
fn empty_lesson_list_never_fetches_metadata() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let source = Arc::new(CountingSource::new(Vec::new()));
        let tracker = TermTracker::new(source.clone(), Arc::new(IdentityStemmer));

        let top = tracker.top_terms(&cx, "construction", 10).await.expect("rank");
        assert!(top.is_empty());
        assert_eq!(source.id_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.metadata_calls.load(Ordering::SeqCst), 0);
    });
}

#[test]
fn lesson_ids_flow_into_metadata_fetch() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let ids = vec![LessonId::new("a"), LessonId::new("b"), LessonId::new("c")];
        let source = Arc::new(CountingSource::new(ids));
        let tracker = TermTracker::new(source.clone(), Arc::new(IdentityStemmer));

        let top = tracker.top_terms(&cx, "construction", 10).await.expect("rank");
        assert_eq!(top, vec![RankedTerm::new("budget", 3, 0)]);
        assert_eq!(source.metadata_calls.load(Ordering::SeqCst), 1);
    });
}

// ═══════════════════════════════════════════════════════════════════════════
// 3. Pure pipeline properties
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn extracted_fixture_terms_rank_like_direct_input() {
    let value = MetadataValue::from(json!([
        "Cost Overrun",
        {"k": "cost-overrun"},
        [["Cost Overrun"]],
        "Schedule Delay"
    ]));
    let raw = extract(&value);
    assert_eq!(raw.len(), 4);

    let direct = rank_metadata_terms(
        ["Cost Overrun", "cost-overrun", "Cost Overrun", "Schedule Delay"],
        10,
        &IdentityStemmer,
    );
    assert_eq!(rank_metadata_terms(&raw, 10, &IdentityStemmer), direct);
    assert_eq!(direct[0].term, "cost overrun");
}

#[test]
fn boundary_and_disjoint_scenarios() {
    let cost = StemSet::build("cost", &IdentityStemmer);
    let overrun = StemSet::build("cost overrun", &IdentityStemmer);
    assert!(is_close_match(&cost, &overrun));
    assert!(is_close_match(&overrun, &cost));

    let budget = StemSet::build("budget", &IdentityStemmer);
    let timeline = StemSet::build("timeline", &IdentityStemmer);
    assert!(!is_close_match(&budget, &timeline));

    let ranked = rank_metadata_terms(["budget", "timeline"], 10, &IdentityStemmer);
    assert!(ranked.iter().all(|e| e.close_count == 0));
}

#[test]
fn ranking_cap_holds_for_every_limit() {
    let terms = [
        "scope creep",
        "scope",
        "vendor delay",
        "vendor",
        "permits",
        "permits",
        "",
        "crane",
    ];
    let distinct = {
        let mut seen: Vec<String> = terms
            .iter()
            .map(|t| normalize_term(t))
            .filter(|t| !t.is_empty())
            .collect();
        seen.sort();
        seen.dedup();
        seen.len()
    };
    for limit in 0..10 {
        let ranked = rank_metadata_terms(terms, limit, &IdentityStemmer);
        assert!(ranked.len() <= limit);
        assert!(ranked.len() <= distinct);
        assert!(ranked.iter().all(|e| !e.term.is_empty()));
        assert!(ranked.iter().all(|e| normalize_term(&e.term) == e.term));
        assert!(ranked.iter().all(|e| e.total_count == e.exact_count + e.close_count));
    }
}

#[test]
fn equal_counts_sort_alphabetically() {
    let ranked = rank_metadata_terms(["welding", "asbestos", "lighting"], 10, &IdentityStemmer);
    let terms: Vec<_> = ranked.iter().map(|e| e.term.as_str()).collect();
    assert_eq!(terms, vec!["asbestos", "lighting", "welding"]);
}

#[test]
fn config_threshold_changes_merging() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let store = InMemoryLessonStore::new().add_lesson(LessonRecord::shared(
            "ll-1",
            "construction",
            MetadataValue::tags(["cost", "cost overrun"]),
        ));
        let strict = TermTracker::from_sync(store.clone(), Arc::new(IdentityStemmer))
            .with_config(TrackerConfig {
                close_match_threshold: 0.75,
                max_size_skew: 0,
                ..TrackerConfig::default()
            })
            .expect("valid config");
        let default = identity_tracker(store);

        let strict_top = strict.top_terms(&cx, "construction", 10).await.expect("rank");
        let default_top = default.top_terms(&cx, "construction", 10).await.expect("rank");
        assert!(strict_top.iter().all(|e| e.close_count == 0));
        assert!(default_top.iter().all(|e| e.close_count == 1));
    });
}
