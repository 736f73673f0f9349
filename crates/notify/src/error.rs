use campusgig_core::types::DbId;

/// Failure of a persistence collaborator (settings store or ledger).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Ledger row {0} not found")]
    MissingRow(DbId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Failure while asking the identity provider for the current user.
#[derive(Debug, thiserror::Error)]
#[error("Identity lookup failed: {0}")]
pub struct IdentityError(pub String);
