//! Integration tests for the SQLite concept store against the full
//! IConceptStore contract.

use chrono::{Duration, Utc};
use lexis_core::traits::{ConceptScan, IConceptStore};
use lexis_core::{
    Concept, ConceptOrigin, ConceptStatus, ConceptUpdate, Language, LexisError, Score,
    Translation,
};
use lexis_store::ConceptStore;

fn store() -> ConceptStore {
    ConceptStore::open_in_memory().unwrap()
}

fn make_concept(term: &str, score: f64) -> Concept {
    Concept::new(
        term,
        vec!["symptoms_general".to_string()],
        ConceptOrigin::Generated,
        score,
        0.6,
        Utc::now(),
    )
}

#[test]
fn insert_and_find_round_trip() {
    let store = store();
    let concept = make_concept("headache", 0.5);
    store.insert(&concept).unwrap();

    let by_id = store.find_by_id(&concept.id).unwrap().unwrap();
    assert_eq!(by_id, concept);
    assert_eq!(by_id.english_term, "headache");
    assert_eq!(by_id.translations.en.term, "headache");
    assert_eq!(by_id.categories, vec!["symptoms_general"]);

    let by_term = store.find_by_english_term("headache").unwrap().unwrap();
    assert_eq!(by_term.id, concept.id);
}

#[test]
fn english_term_lookup_is_case_insensitive() {
    let store = store();
    store.insert(&make_concept("fever", 0.5)).unwrap();
    assert!(store.find_by_english_term("FeVeR").unwrap().is_some());
    assert!(store.find_by_english_term(" fever ").unwrap().is_some());
}

#[test]
fn duplicate_english_term_rejected() {
    let store = store();
    store.insert(&make_concept("cough", 0.5)).unwrap();
    let err = store.insert(&make_concept("Cough", 0.5)).unwrap_err();
    assert!(matches!(err, LexisError::DuplicateTerm { term } if term == "cough"));
}

#[test]
fn update_unknown_id_is_not_found() {
    let store = store();
    let err = store
        .update("no-such-id", &ConceptUpdate::new().increment_usage())
        .unwrap_err();
    assert!(matches!(err, LexisError::NotFound { .. }));
}

#[test]
fn partial_update_only_touches_named_fields() {
    let store = store();
    let concept = make_concept("nausea", 0.5);
    store.insert(&concept).unwrap();

    let now = Utc::now();
    store
        .update(
            &concept.id,
            &ConceptUpdate::new()
                .confidence_score(Score::new(0.62))
                .status(ConceptStatus::Active)
                .last_used_at(now)
                .increment_usage(),
        )
        .unwrap();

    let updated = store.find_by_id(&concept.id).unwrap().unwrap();
    assert!((updated.confidence_score.value() - 0.62).abs() < 1e-9);
    assert_eq!(updated.status, ConceptStatus::Active);
    assert_eq!(updated.usage_count, 1);
    assert!(updated.last_used_at.is_some());
    // Untouched fields survive.
    assert_eq!(updated.historical_yield.value(), 0.0);
    assert_eq!(updated.english_term, "nausea");
}

#[test]
fn usage_count_increments_accumulate() {
    let store = store();
    let concept = make_concept("fatigue", 0.5);
    store.insert(&concept).unwrap();
    for _ in 0..3 {
        store
            .update(&concept.id, &ConceptUpdate::new().increment_usage())
            .unwrap();
    }
    let updated = store.find_by_id(&concept.id).unwrap().unwrap();
    assert_eq!(updated.usage_count, 3);
}

#[test]
fn add_category_is_set_semantics() {
    let store = store();
    let concept = make_concept("rash", 0.5);
    store.insert(&concept).unwrap();

    store
        .update(&concept.id, &ConceptUpdate::new().add_category("disease_measles"))
        .unwrap();
    store
        .update(&concept.id, &ConceptUpdate::new().add_category("disease_measles"))
        .unwrap();

    let updated = store.find_by_id(&concept.id).unwrap().unwrap();
    assert_eq!(
        updated.categories,
        vec!["symptoms_general".to_string(), "disease_measles".to_string()]
    );
}

#[test]
fn set_translation_overwrites_one_slot() {
    let store = store();
    let concept = make_concept("dizziness", 0.5);
    store.insert(&concept).unwrap();

    store
        .update(
            &concept.id,
            &ConceptUpdate::new().set_translation(Language::Fr, Translation::translated("vertige")),
        )
        .unwrap();

    let updated = store.find_by_id(&concept.id).unwrap().unwrap();
    assert_eq!(updated.translations.fr.term, "vertige");
    assert!(updated.translations.fr.is_translated());
    // Other slots untouched.
    assert_eq!(updated.translations.en.term, "dizziness");
    assert_eq!(
        updated.translations.ar.status,
        lexis_core::TranslationStatus::Pending
    );
}

#[test]
fn list_is_newest_first() {
    let store = store();
    let base = Utc::now();
    for (i, term) in ["first", "second", "third"].iter().enumerate() {
        let mut c = make_concept(term, 0.5);
        c.created_at = base + Duration::seconds(i as i64);
        store.insert(&c).unwrap();
    }

    let page = store.list(0, 10).unwrap();
    let terms: Vec<&str> = page.iter().map(|c| c.english_term.as_str()).collect();
    assert_eq!(terms, vec!["third", "second", "first"]);

    let page = store.list(1, 1).unwrap();
    assert_eq!(page[0].english_term, "second");
}

#[test]
fn active_keywords_filter_and_rank() {
    let store = store();
    let base = Utc::now();

    // High score, French translated.
    let mut a = make_concept("headache", 0.9);
    a.status = ConceptStatus::Active;
    a.translations.fr = Translation::translated("mal de tête");
    a.created_at = base;
    store.insert(&a).unwrap();

    // Qualifying score and status, but French failed — must be excluded.
    let mut b = make_concept("fever", 0.8);
    b.status = ConceptStatus::Active;
    b.translations.fr = Translation::failed();
    store.insert(&b).unwrap();

    // Active, French translated, lower score.
    let mut c = make_concept("cough", 0.7);
    c.status = ConceptStatus::Active;
    c.translations.fr = Translation::translated("toux");
    store.insert(&c).unwrap();

    // Below min_score.
    let mut d = make_concept("chills", 0.4);
    d.status = ConceptStatus::Inactive;
    d.translations.fr = Translation::translated("frissons");
    store.insert(&d).unwrap();

    let keywords = store
        .list_active_keywords(Language::Fr, 0.5, 10)
        .unwrap();
    let terms: Vec<&str> = keywords.iter().map(|k| k.term.as_str()).collect();
    assert_eq!(terms, vec!["mal de tête", "toux"]);
    assert_eq!(keywords[0].english_term, "headache");
    assert_eq!(keywords[0].concept_id, a.id);
}

#[test]
fn active_keyword_ties_break_by_created_at_desc() {
    let store = store();
    let base = Utc::now();

    let mut older = make_concept("older", 0.8);
    older.status = ConceptStatus::Active;
    older.created_at = base;
    store.insert(&older).unwrap();

    let mut newer = make_concept("newer", 0.8);
    newer.status = ConceptStatus::Active;
    newer.created_at = base + Duration::seconds(5);
    store.insert(&newer).unwrap();

    let keywords = store.list_active_keywords(Language::En, 0.5, 10).unwrap();
    let terms: Vec<&str> = keywords.iter().map(|k| k.term.as_str()).collect();
    assert_eq!(terms, vec!["newer", "older"]);
}

#[test]
fn scan_pages_through_everything_once() {
    let store = store();
    for i in 0..25 {
        store.insert(&make_concept(&format!("term-{i}"), 0.5)).unwrap();
    }

    let scan = ConceptScan::with_page_size(&store, 10);
    let mut seen: Vec<String> = scan.map(|r| r.unwrap().english_term).collect();
    assert_eq!(seen.len(), 25);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 25, "no concept visited twice");

    assert_eq!(store.count().unwrap(), 25);
}
