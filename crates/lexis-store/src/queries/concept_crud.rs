//! Insert, lookup, listing, and atomic partial update for concepts.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use lexis_core::errors::{LexisError, LexisResult};
use lexis_core::{Concept, ConceptUpdate};

use super::{concept_from_row, enum_to_str, CONCEPT_COLUMNS};
use crate::to_store_err;

pub fn insert_concept(conn: &Connection, concept: &Concept) -> LexisResult<()> {
    let translations_json = serde_json::to_string(&concept.translations)?;
    let categories_json = serde_json::to_string(&concept.categories)?;
    let origin = enum_to_str(&concept.origin)?;
    let status = enum_to_str(&concept.status)?;

    let result = conn.execute(
        "INSERT INTO concepts (
            id, english_term, translations, categories, origin,
            confidence_score, historical_yield, usage_count, status,
            created_at, updated_at, last_used_at, last_positive_feedback_at,
            last_decay_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            concept.id,
            concept.english_term,
            translations_json,
            categories_json,
            origin,
            concept.confidence_score.value(),
            concept.historical_yield.value(),
            concept.usage_count,
            status,
            concept.created_at.to_rfc3339(),
            concept.updated_at.to_rfc3339(),
            concept.last_used_at.map(|t| t.to_rfc3339()),
            concept.last_positive_feedback_at.map(|t| t.to_rfc3339()),
            concept.last_decay_at.map(|t| t.to_rfc3339()),
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(LexisError::DuplicateTerm {
                term: concept.english_term.clone(),
            })
        }
        Err(e) => Err(to_store_err(e)),
    }
}

pub fn get_concept(conn: &Connection, id: &str) -> LexisResult<Option<Concept>> {
    let sql = format!("SELECT {CONCEPT_COLUMNS} FROM concepts WHERE id = ?1");
    let row = conn
        .query_row(&sql, params![id], |row| {
            Ok(concept_from_row(row))
        })
        .optional()
        .map_err(to_store_err)?;
    row.transpose()
}

pub fn get_concept_by_english_term(
    conn: &Connection,
    term: &str,
) -> LexisResult<Option<Concept>> {
    let sql =
        format!("SELECT {CONCEPT_COLUMNS} FROM concepts WHERE lower(english_term) = lower(?1)");
    let row = conn
        .query_row(&sql, params![term.trim()], |row| {
            Ok(concept_from_row(row))
        })
        .optional()
        .map_err(to_store_err)?;
    row.transpose()
}

/// Page through concepts, newest first. The id tiebreak keeps scans stable
/// when several concepts share a creation instant.
pub fn list_concepts(conn: &Connection, skip: u64, limit: u64) -> LexisResult<Vec<Concept>> {
    let sql = format!(
        "SELECT {CONCEPT_COLUMNS} FROM concepts
         ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2"
    );
    let mut stmt = conn.prepare(&sql).map_err(to_store_err)?;
    let rows = stmt
        .query_map(params![limit, skip], |row| Ok(concept_from_row(row)))
        .map_err(to_store_err)?;

    let mut concepts = Vec::new();
    for row in rows {
        concepts.push(row.map_err(to_store_err)??);
    }
    Ok(concepts)
}

pub fn count_concepts(conn: &Connection) -> LexisResult<u64> {
    conn.query_row("SELECT COUNT(*) FROM concepts", [], |row| row.get(0))
        .map_err(to_store_err)
}

/// Apply a partial update as one UPDATE statement.
///
/// `usage_count` is incremented in place and the category insert is guarded
/// inside the statement, so concurrent writers can interleave without
/// violating monotonicity or duplicating categories.
pub fn update_concept(
    conn: &Connection,
    id: &str,
    update: &ConceptUpdate,
    now: DateTime<Utc>,
) -> LexisResult<()> {
    let mut sets: Vec<String> = vec!["updated_at = ?".to_string()];
    let mut values: Vec<Value> = vec![Value::from(now.to_rfc3339())];

    if let Some(score) = update.confidence_score {
        sets.push("confidence_score = ?".to_string());
        values.push(Value::from(score.value()));
    }
    if let Some(score) = update.historical_yield {
        sets.push("historical_yield = ?".to_string());
        values.push(Value::from(score.value()));
    }
    if let Some(status) = update.status {
        sets.push("status = ?".to_string());
        values.push(Value::from(enum_to_str(&status)?));
    }
    if let Some(at) = update.last_used_at {
        sets.push("last_used_at = ?".to_string());
        values.push(Value::from(at.to_rfc3339()));
    }
    if let Some(at) = update.last_positive_feedback_at {
        sets.push("last_positive_feedback_at = ?".to_string());
        values.push(Value::from(at.to_rfc3339()));
    }
    if let Some(at) = update.last_decay_at {
        sets.push("last_decay_at = ?".to_string());
        values.push(Value::from(at.to_rfc3339()));
    }
    if update.increment_usage {
        sets.push("usage_count = usage_count + 1".to_string());
    }
    if let Some(category) = &update.add_category {
        sets.push(
            "categories = CASE
                WHEN EXISTS (SELECT 1 FROM json_each(concepts.categories)
                             WHERE json_each.value = ?)
                THEN categories
                ELSE json_insert(categories, '$[#]', ?)
             END"
            .to_string(),
        );
        values.push(Value::from(category.clone()));
        values.push(Value::from(category.clone()));
    }
    for (language, translation) in &update.set_translations {
        // Language is a closed enum; the JSON path is not attacker-reachable.
        sets.push(format!(
            "translations = json_set(translations, '$.{}', json(?))",
            language.code()
        ));
        values.push(Value::from(serde_json::to_string(translation)?));
    }

    values.push(Value::from(id.to_string()));
    let sql = format!("UPDATE concepts SET {} WHERE id = ?", sets.join(", "));

    let changed = conn
        .execute(&sql, params_from_iter(values))
        .map_err(to_store_err)?;
    if changed == 0 {
        return Err(LexisError::NotFound { id: id.to_string() });
    }
    Ok(())
}
