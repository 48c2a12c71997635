//! Error type shared by every fallible table operation.

/// Failures surfaced by `ChainedHashTable`.
///
/// A missing key on `remove` is not an error; it reports `Ok(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The caller passed no key.
    #[error("key must be present")]
    InvalidKey,

    /// A case-insensitive match for the key is already stored.
    #[error("key already exists in the table")]
    DuplicateKey,

    /// `get` found no entry for the key.
    #[error("key not found in the table")]
    KeyNotFound,
}

pub type Result<T> = core::result::Result<T, TableError>;
