/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("concept document corrupt: {details}")]
    Corrupt { details: String },
}
