use chrono::Utc;
use lexis_core::{ConceptOrigin, EngineConfig, IConceptStore, LexisError, TranslationStatus};
use lexis_generation::{create_manual, ManualConcept};
use lexis_store::ConceptStore;

#[test]
fn manual_creation_seeds_provided_slots_only() {
    let store = ConceptStore::open_in_memory().unwrap();
    let config = EngineConfig::default();
    let request = ManualConcept {
        english_term: "  Dengue Fever ".to_string(),
        french_term: Some("Dengue".to_string()),
        arabic_term: None,
        categories: vec!["disease_dengue".to_string()],
    };

    let concept = create_manual(&store, &config, &request, Utc::now()).unwrap();
    assert_eq!(concept.english_term, "dengue fever");
    assert_eq!(concept.origin, ConceptOrigin::Manual);
    assert_eq!(concept.confidence_score.value(), config.initial_score);

    let stored = store.find_by_id(&concept.id).unwrap().unwrap();
    assert_eq!(stored.translations.fr.term, "dengue");
    assert!(stored.translations.fr.is_translated());
    assert_eq!(stored.translations.ar.status, TranslationStatus::Pending);
    assert!(stored.has_category("disease_dengue"));
}

#[test]
fn duplicate_english_term_is_rejected() {
    let store = ConceptStore::open_in_memory().unwrap();
    let config = EngineConfig::default();
    let request = ManualConcept {
        english_term: "cholera".to_string(),
        ..ManualConcept::default()
    };
    create_manual(&store, &config, &request, Utc::now()).unwrap();

    let again = ManualConcept {
        english_term: "CHOLERA".to_string(),
        ..ManualConcept::default()
    };
    let err = create_manual(&store, &config, &again, Utc::now()).unwrap_err();
    assert!(matches!(err, LexisError::DuplicateTerm { .. }));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn blank_terms_are_rejected_before_any_write() {
    let store = ConceptStore::open_in_memory().unwrap();
    let config = EngineConfig::default();

    let empty_anchor = ManualConcept {
        english_term: "   ".to_string(),
        ..ManualConcept::default()
    };
    assert!(matches!(
        create_manual(&store, &config, &empty_anchor, Utc::now()),
        Err(LexisError::Validation { .. })
    ));

    let empty_slot = ManualConcept {
        english_term: "cholera".to_string(),
        french_term: Some("  ".to_string()),
        ..ManualConcept::default()
    };
    assert!(matches!(
        create_manual(&store, &config, &empty_slot, Utc::now()),
        Err(LexisError::Validation { .. })
    ));
    assert_eq!(store.count().unwrap(), 0);
}
