//! Schema initialization. One versioned migration; `user_version` guards
//! against re-running and leaves room for future versions.

use rusqlite::Connection;

use lexis_core::errors::LexisResult;

use crate::to_store_err;

const SCHEMA_VERSION: u32 = 1;

pub fn run_migrations(conn: &Connection) -> LexisResult<()> {
    let version: u32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(to_store_err)?;

    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute_batch(
        "BEGIN;
         CREATE TABLE IF NOT EXISTS concepts (
             id                        TEXT PRIMARY KEY,
             english_term              TEXT NOT NULL,
             translations              TEXT NOT NULL,
             categories                TEXT NOT NULL,
             origin                    TEXT NOT NULL,
             confidence_score          REAL NOT NULL,
             historical_yield          REAL NOT NULL,
             usage_count               INTEGER NOT NULL DEFAULT 0,
             status                    TEXT NOT NULL,
             created_at                TEXT NOT NULL,
             updated_at                TEXT NOT NULL,
             last_used_at              TEXT,
             last_positive_feedback_at TEXT,
             last_decay_at             TEXT
         );
         CREATE UNIQUE INDEX IF NOT EXISTS idx_concepts_english_term
             ON concepts (lower(english_term));
         CREATE INDEX IF NOT EXISTS idx_concepts_created_at
             ON concepts (created_at DESC);
         CREATE INDEX IF NOT EXISTS idx_concepts_status_score
             ON concepts (status, confidence_score DESC);
         PRAGMA user_version = 1;
         COMMIT;",
    )
    .map_err(to_store_err)?;

    tracing::debug!(version = SCHEMA_VERSION, "concept schema initialized");
    Ok(())
}
