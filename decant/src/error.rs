use thiserror::Error;

use crate::type_key::TypeKey;

/// Result type for the `decant` library
pub type Result<T> = core::result::Result<T, error_stack::Report<Error>>;

/// Error cases surfaced by the resolution layer and its collaborators
///
/// Configuration errors are reported synchronously to the caller of the
/// configuration call; there is no deferred error channel. Lookup misses in
/// the registries are not errors — they are the designed fallback path and
/// surface as `Option::None`.
#[derive(Debug, Error)]
pub enum Error {
    /// A decoder implementation rejected its input
    #[error("Decode failed: {0}")]
    Decode(String),

    /// A configuration call received an unusable extension
    #[error("Invalid extension: {0}")]
    InvalidExtension(String),

    /// A decoding chain could not construct a decoder for a type
    ///
    /// Raised by [`DecoderChain`](crate::DecoderChain) implementations, never
    /// by the resolution layer itself, and propagated verbatim through it.
    #[error("No decoder constructible for type: {type_key}")]
    Unconstructible {
        /// Canonical key of the type that could not be handled
        type_key: TypeKey,
    },
}

impl Error {
    /// Create an error for a decoder that rejected its input
    pub fn decode_failed(what: &str, details: impl std::fmt::Display) -> Self {
        Self::Decode(format!("{what}: {details}"))
    }

    /// Create an error for an extension rejected at registration time
    pub fn invalid_extension(reason: impl Into<String>) -> Self {
        Self::InvalidExtension(reason.into())
    }

    /// Create an error for a type no chain entry point can handle
    pub fn unconstructible(type_key: TypeKey) -> Self {
        Self::Unconstructible { type_key }
    }
}
