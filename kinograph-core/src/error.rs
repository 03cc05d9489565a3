use thiserror::Error;

/// Categorized domain failure, distinct from transport-level errors.
///
/// The HTTP boundary maps each variant to a response status; the core never
/// retries and never swallows a failed write.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A referenced entity (user, film, genre, rating, edge) is absent.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate like, duplicate friendship request, self-friendship,
    /// duplicate login.
    #[error("{0}")]
    Conflict(String),

    /// Malformed argument that survived input validation, e.g. a
    /// non-positive result count or an unknown catalog id.
    #[error("{0}")]
    InvalidArgument(String),

    /// Storage failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
