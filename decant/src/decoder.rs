//! The decoder contract
//!
//! A decoder converts an already-parsed generic representation
//! ([`serde_json::Value`]) into a runtime instance of a target type.
//! Wire-level parsing is not this crate's concern: by the time a decoder
//! runs, bytes have already become a `Value`.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use crate::config::DecodeConfig;
use crate::error::Result;

/// A decoded runtime value, type-erased
///
/// Callers recover the concrete type with [`Box::downcast`]. A decoder may
/// produce a narrower runtime type than the key it is registered under;
/// whether that substitution is acceptable is the caller's business, the
/// registries perform no check.
pub type DecodedValue = Box<dyn Any + Send>;

/// Shared handle to a decoder, as stored in registries and returned from
/// resolution
pub type DecoderRef = Arc<dyn Decoder>;

/// Converts a serialized representation into an instance of a target type
///
/// Implementations must be thread-safe: once configuration is complete a
/// decoder may be invoked from arbitrarily many readers concurrently.
pub trait Decoder: Send + Sync {
    /// Decode `input` into a runtime value
    ///
    /// `config` carries the decode-time settings the caller resolved with;
    /// implementations are free to ignore it.
    fn decode(&self, input: &Value, config: &DecodeConfig) -> Result<DecodedValue>;
}
