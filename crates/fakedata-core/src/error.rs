use thiserror::Error;

/// Core error type shared across fakedata crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A field specifier does not follow `[name=]key[:options]`.
    #[error("invalid specifier '{token}': {reason}")]
    InvalidSpecifier { token: String, reason: String },
}

/// Convenience alias for results returned by fakedata crates.
pub type Result<T> = std::result::Result<T, Error>;
