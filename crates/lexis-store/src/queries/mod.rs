//! SQL for the concept table, split by concern.

pub mod concept_crud;
pub mod keyword_query;

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;

use lexis_core::errors::{LexisError, LexisResult, StoreError};
use lexis_core::{Concept, Score};

use crate::to_store_err;

/// Serialize a unit enum to its bare string form (serde tag without quotes).
pub(crate) fn enum_to_str<T: Serialize>(value: &T) -> LexisResult<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.trim_matches('"').to_string())
}

/// Parse a unit enum from its bare string form.
pub(crate) fn enum_from_str<T: DeserializeOwned>(s: &str) -> LexisResult<T> {
    serde_json::from_str(&format!("\"{s}\"")).map_err(|e| {
        LexisError::Store(StoreError::Corrupt {
            details: format!("bad enum value '{s}': {e}"),
        })
    })
}

pub(crate) fn parse_timestamp(s: &str) -> LexisResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            LexisError::Store(StoreError::Corrupt {
                details: format!("bad timestamp '{s}': {e}"),
            })
        })
}

/// Column order shared by every `SELECT *`-shaped concept query.
pub(crate) const CONCEPT_COLUMNS: &str = "id, english_term, translations, categories, origin, \
     confidence_score, historical_yield, usage_count, status, \
     created_at, updated_at, last_used_at, last_positive_feedback_at, last_decay_at";

/// Rehydrate a concept from a row selected with [`CONCEPT_COLUMNS`].
pub(crate) fn concept_from_row(row: &Row<'_>) -> LexisResult<Concept> {
    let translations_json: String = row.get(2).map_err(to_store_err)?;
    let categories_json: String = row.get(3).map_err(to_store_err)?;
    let origin: String = row.get(4).map_err(to_store_err)?;
    let status: String = row.get(8).map_err(to_store_err)?;
    let created_at: String = row.get(9).map_err(to_store_err)?;
    let updated_at: String = row.get(10).map_err(to_store_err)?;
    let last_used_at: Option<String> = row.get(11).map_err(to_store_err)?;
    let last_positive_feedback_at: Option<String> = row.get(12).map_err(to_store_err)?;
    let last_decay_at: Option<String> = row.get(13).map_err(to_store_err)?;

    Ok(Concept {
        id: row.get(0).map_err(to_store_err)?,
        english_term: row.get(1).map_err(to_store_err)?,
        translations: serde_json::from_str(&translations_json)?,
        categories: serde_json::from_str(&categories_json)?,
        origin: enum_from_str(&origin)?,
        confidence_score: Score::new(row.get(5).map_err(to_store_err)?),
        historical_yield: Score::new(row.get(6).map_err(to_store_err)?),
        usage_count: row.get(7).map_err(to_store_err)?,
        status: enum_from_str(&status)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
        last_used_at: last_used_at.as_deref().map(parse_timestamp).transpose()?,
        last_positive_feedback_at: last_positive_feedback_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?,
        last_decay_at: last_decay_at.as_deref().map(parse_timestamp).transpose()?,
    })
}
