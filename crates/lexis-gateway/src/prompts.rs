//! Prompt construction for generation and translation calls.

use lexis_core::Language;

/// Prompt for discovering keyword candidates for one health topic.
/// The model is asked for bare terms, one per line, in the target language.
pub fn generation_prompt(
    topic_description: &str,
    language: Language,
    context: Option<&str>,
) -> String {
    match context {
        Some(context) => format!(
            "You monitor public discussion of health topics.\n\
             Topic: {topic_description}\n\
             Recent local context:\n{context}\n\n\
             List the search keywords and short phrases people writing in \
             {lang} ({code}) would actually use when discussing this topic. \
             Output one term per line, lowercase, no numbering, no commentary.",
            lang = language.name(),
            code = language.code(),
        ),
        None => format!(
            "You monitor public discussion of health topics.\n\
             Topic: {topic_description}\n\n\
             List the search keywords and short phrases people writing in \
             {lang} ({code}) would actually use when discussing this topic. \
             Output one term per line, lowercase, no numbering, no commentary.",
            lang = language.name(),
            code = language.code(),
        ),
    }
}

/// Prompt for translating a single term between supported languages.
pub fn translation_prompt(term: &str, source: Language, target: Language) -> String {
    format!(
        "Translate the health-related term \"{term}\" from {src} to {dst}. \
         Reply with the translated term only, lowercase, no quotes, no commentary.",
        src = source.name(),
        dst = target.name(),
    )
}
