/// Errors that can occur within the storage layer.
///
/// The `Display` text of the validation variants is shown to API callers
/// as-is, so it names the offending fields in the request's own spelling.
///
/// # Examples
///
/// ```rust
/// use carebook_storage::error::StorageError;
///
/// let err = StorageError::Validation {
///     entity: "Prescription",
///     fields: vec!["drugName", "dosage"],
/// };
/// assert_eq!(
///     err.to_string(),
///     "Prescription validation failed: drugName, dosage required"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// One or more required fields were missing or blank.
    #[error("{entity} validation failed: {} required", .fields.join(", "))]
    Validation {
        entity: &'static str,
        fields: Vec<&'static str>,
    },

    /// A timestamp field could not be parsed.
    #[error("{entity} validation failed: {field} '{value}' is not a valid date")]
    InvalidTimestamp {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// A unique index rejected the insert.
    #[error("{entity} already exists")]
    Duplicate { entity: &'static str },

    /// An underlying database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Password hashing or verification failure.
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
