//! Generation pipeline against an in-memory store and a scripted provider.

use std::sync::Arc;

use chrono::Utc;
use lexis_core::errors::ProviderError;
use lexis_core::{
    ConceptOrigin, EngineConfig, IConceptStore, Language, LexisError, TranslationStatus,
};
use lexis_gateway::testing::ScriptedModel;
use lexis_gateway::LlmGateway;
use lexis_generation::{CategoryCatalog, GenerationPipeline};
use lexis_store::ConceptStore;

fn setup() -> (Arc<ConceptStore>, Arc<ScriptedModel>, GenerationPipeline) {
    setup_with_catalog(CategoryCatalog::builtin())
}

fn setup_with_catalog(
    catalog: CategoryCatalog,
) -> (Arc<ConceptStore>, Arc<ScriptedModel>, GenerationPipeline) {
    let store = Arc::new(ConceptStore::open_in_memory().unwrap());
    let model = Arc::new(ScriptedModel::new());
    let config = EngineConfig {
        // No pacing waits in tests.
        rate_limit_rpm: 60_000,
        ..EngineConfig::default()
    };
    let gateway = Arc::new(LlmGateway::new(model.clone(), &config));
    let pipeline = GenerationPipeline::new(
        store.clone() as Arc<dyn IConceptStore>,
        gateway,
        catalog,
        config,
    );
    (store, model, pipeline)
}

#[tokio::test]
async fn english_run_creates_concepts_with_all_translations() {
    let (store, model, pipeline) = setup();
    model.push_ok("fever\nchills");
    model.push_ok("fièvre"); // fever → fr
    model.push_ok("حمى"); // fever → ar
    model.push_ok("frissons"); // chills → fr
    model.push_ok("قشعريرة"); // chills → ar

    let report = pipeline
        .generate_in_language(Some("symptoms_fever_temperature"), Language::En, Utc::now())
        .await
        .unwrap();

    assert_eq!(report.terms_generated, 2);
    assert_eq!(report.created, 2);
    assert_eq!(report.merged, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(report.concept_ids.len(), 2);
    assert_eq!(store.count().unwrap(), 2);

    let fever = store.find_by_english_term("fever").unwrap().unwrap();
    assert_eq!(fever.origin, ConceptOrigin::Generated);
    assert!(fever.has_category("symptoms_fever_temperature"));
    assert_eq!(fever.translations.fr.term, "fièvre");
    assert!(fever.translations.fr.is_translated());
    assert!(fever.translations.ar.is_translated());
    assert_eq!(fever.confidence_score.value(), 0.5);
    assert_eq!(fever.usage_count, 0);
}

#[tokio::test]
async fn rediscovery_attaches_category_without_touching_scores() {
    let (store, model, pipeline) = setup();
    model.push_ok("fever");
    model.push_ok("fièvre");
    model.push_ok("حمى");
    pipeline
        .generate_in_language(Some("symptoms_fever_temperature"), Language::En, Utc::now())
        .await
        .unwrap();
    assert_eq!(model.call_count(), 3);

    // Same term rediscovered under another category: all slots are already
    // translated, so the run makes a single provider call.
    model.push_ok("fever");
    let report = pipeline
        .generate_in_language(Some("disease_influenza_seasonal"), Language::En, Utc::now())
        .await
        .unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.merged, 1);
    assert_eq!(model.call_count(), 4);
    assert_eq!(store.count().unwrap(), 1);

    let fever = store.find_by_english_term("fever").unwrap().unwrap();
    assert!(fever.has_category("symptoms_fever_temperature"));
    assert!(fever.has_category("disease_influenza_seasonal"));
    assert_eq!(fever.confidence_score.value(), 0.5);
}

#[tokio::test]
async fn candidates_normalizing_to_one_anchor_collapse_in_batch() {
    let (store, model, pipeline) = setup();
    model.push_ok("fever\n\"Fever\"\n- fever");
    model.push_ok("fièvre");
    model.push_ok("حمى");

    let report = pipeline
        .generate_in_language(Some("symptoms_fever_temperature"), Language::En, Utc::now())
        .await
        .unwrap();

    assert_eq!(report.terms_generated, 3);
    assert_eq!(report.created, 1);
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn per_language_translation_failure_still_creates_the_concept() {
    let (store, model, pipeline) = setup();
    model.push_ok("fever");
    model.push_err(ProviderError::Transport {
        reason: "timeout".into(),
    }); // fever → fr fails
    model.push_ok("حمى");

    let report = pipeline
        .generate_in_language(Some("symptoms_fever_temperature"), Language::En, Utc::now())
        .await
        .unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.failed, 0);

    let fever = store.find_by_english_term("fever").unwrap().unwrap();
    assert_eq!(fever.translations.fr.status, TranslationStatus::Failed);
    assert_eq!(fever.translations.fr.term, "");
    assert!(fever.translations.ar.is_translated());
}

#[tokio::test]
async fn later_run_repairs_a_failed_slot() {
    let (store, model, pipeline) = setup();
    model.push_ok("fever");
    model.push_err(ProviderError::Transport {
        reason: "timeout".into(),
    });
    model.push_ok("حمى");
    pipeline
        .generate_in_language(Some("symptoms_fever_temperature"), Language::En, Utc::now())
        .await
        .unwrap();

    // Rediscovered: merge retries only the failed French slot.
    model.push_ok("fever");
    model.push_ok("fièvre");
    let report = pipeline
        .generate_in_language(Some("symptoms_fever_temperature"), Language::En, Utc::now())
        .await
        .unwrap();
    assert_eq!(report.merged, 1);

    let fever = store.find_by_english_term("fever").unwrap().unwrap();
    assert!(fever.translations.fr.is_translated());
    assert_eq!(fever.translations.fr.term, "fièvre");
    assert_eq!(fever.confidence_score.value(), 0.5);
    assert_eq!(fever.usage_count, 0);
}

#[tokio::test]
async fn non_english_run_anchors_on_the_english_translation() {
    let (store, model, pipeline) = setup();
    model.push_ok("fièvre");
    model.push_ok("fever"); // anchor translation fr → en
    model.push_ok("حمى"); // en → ar

    let report = pipeline
        .generate_in_language(Some("symptoms_fever_temperature"), Language::Fr, Utc::now())
        .await
        .unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.language, Language::Fr);

    let fever = store.find_by_english_term("fever").unwrap().unwrap();
    // Source term fills its own slot without another provider call.
    assert_eq!(fever.translations.fr.term, "fièvre");
    assert!(fever.translations.ar.is_translated());
    assert_eq!(model.call_count(), 3);
}

#[tokio::test]
async fn anchor_translation_failure_drops_the_candidate() {
    let (store, model, pipeline) = setup();
    model.push_ok("fièvre");
    model.push_err(ProviderError::Transport {
        reason: "timeout".into(),
    });

    let report = pipeline
        .generate_in_language(Some("symptoms_fever_temperature"), Language::Fr, Utc::now())
        .await
        .unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.created, 0);
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn empty_provider_result_is_a_zero_term_run() {
    let (store, model, pipeline) = setup();
    model.push_err(ProviderError::EmptyResult);

    let report = pipeline
        .generate_in_language(Some("disease_covid19"), Language::En, Utc::now())
        .await
        .unwrap();
    assert_eq!(report.terms_generated, 0);
    assert_eq!(report.created, 0);
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn provider_failure_aborts_the_run() {
    let (_store, model, pipeline) = setup();
    model.push_err(ProviderError::Transport {
        reason: "connection refused".into(),
    });

    let err = pipeline
        .generate_in_language(Some("disease_covid19"), Language::En, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, LexisError::Provider(_)));
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let (_store, _model, pipeline) = setup();
    let err = pipeline
        .generate_in_language(Some("no_such_category"), Language::En, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, LexisError::Validation { .. }));
}

#[tokio::test]
async fn context_marks_the_origin() {
    let mut catalog = CategoryCatalog::builtin();
    catalog.set_context("disease_covid19", "hospital admissions rising in Tunis");
    let (store, model, pipeline) = setup_with_catalog(catalog);
    model.push_ok("long covid");
    model.push_ok("covid long");
    model.push_ok("كوفيد طويل");

    pipeline
        .generate_in_language(Some("disease_covid19"), Language::En, Utc::now())
        .await
        .unwrap();

    let concept = store.find_by_english_term("long covid").unwrap().unwrap();
    assert_eq!(concept.origin, ConceptOrigin::GeneratedWithContext);
    // The context text reaches the generation prompt.
    assert!(model.prompts()[0].contains("hospital admissions rising in Tunis"));
}

#[tokio::test]
async fn random_run_picks_a_catalog_category() {
    let (_store, model, pipeline) = setup();
    model.push_err(ProviderError::EmptyResult);

    let report = pipeline
        .generate_for_category(None, Utc::now())
        .await
        .unwrap();
    assert!(CategoryCatalog::builtin()
        .keys()
        .any(|k| k == report.category));
}
