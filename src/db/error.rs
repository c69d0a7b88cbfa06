use thiserror::Error;

/// Failures a store operation can report to its caller. Integrity and
/// validation failures get their own variants so the caller can explain
/// them precisely; anything else from SQLite is an unrecovered storage
/// fault.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("category '{0}' already exists")]
    DuplicateName(String),

    #[error("no category with id {0}")]
    UnknownCategory(i64),

    #[error("amount must not be negative")]
    NegativeAmount,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Result of a delete operation. `Blocked` means the row exists but is
/// still referenced and was left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeleteOutcome {
    Deleted,
    NotFound,
    Blocked,
}
