//! The ranked keyword-fetch query downstream ingestion services read from.

use rusqlite::{params, Connection};

use lexis_core::errors::LexisResult;
use lexis_core::traits::ActiveKeyword;
use lexis_core::Language;

use crate::to_store_err;

/// Active concepts whose slot for `language` is translated and whose score
/// clears `min_score`, best first.
pub fn active_keywords(
    conn: &Connection,
    language: Language,
    min_score: f64,
    limit: u64,
) -> LexisResult<Vec<ActiveKeyword>> {
    // Language is a closed enum; the JSON paths are not attacker-reachable.
    let code = language.code();
    let sql = format!(
        "SELECT json_extract(translations, '$.{code}.term'), id, english_term
         FROM concepts
         WHERE status = 'active'
           AND confidence_score >= ?1
           AND json_extract(translations, '$.{code}.status') = 'translated'
         ORDER BY confidence_score DESC, created_at DESC
         LIMIT ?2"
    );

    let mut stmt = conn.prepare(&sql).map_err(to_store_err)?;
    let rows = stmt
        .query_map(params![min_score, limit], |row| {
            Ok(ActiveKeyword {
                term: row.get(0)?,
                concept_id: row.get(1)?,
                english_term: row.get(2)?,
            })
        })
        .map_err(to_store_err)?;

    let mut keywords = Vec::new();
    for row in rows {
        keywords.push(row.map_err(to_store_err)?);
    }
    Ok(keywords)
}
