//! Contracts between the resolution layer and its collaborators
//!
//! The resolution layer sits between callers and a generic decoding chain.
//! [`DecoderFactory`] is the outward surface callers resolve against;
//! [`DecoderChain`] is the inward surface a generic construction chain
//! implements; [`DecoderProvider`] is the callback a chain uses to resolve
//! decoders for nested types. None of the generic construction logic lives
//! in this crate.

use std::sync::Arc;

use crate::config::DecodeConfig;
use crate::decoder::DecoderRef;
use crate::error::Result;
use crate::factory::category::DecoderCategory;
use crate::registry::{DecoderExtension, Extensions};
use crate::type_key::TypeDescriptor;

/// Resolves decoders for dependent types on behalf of a decoding chain
///
/// When a chain builds a decoder for a record it typically needs decoders
/// for the record's field types; it asks the provider rather than recursing
/// into any particular factory, so callers control caching and re-entry.
pub trait DecoderProvider: Send + Sync {
    /// Resolve a decoder for `descriptor`
    ///
    /// # Errors
    ///
    /// Fails when no decoder can be produced for the type.
    fn decoder_for(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
    ) -> Result<DecoderRef>;
}

/// The generic construction chain consulted when no override matches
///
/// One entry point per creation category. Each may consult `extensions` in
/// registration order for contributed decoders, and may fail with
/// [`Error::Unconstructible`](crate::Error::Unconstructible) when nothing
/// can handle the type. Errors pass through the resolution layer verbatim.
///
/// Extensions travel as an explicit parameter so chain implementations can
/// stay stateless; the factory that delegates to the chain owns the list.
pub trait DecoderChain: Send + Sync {
    /// Construct a decoder for a record-like type
    ///
    /// # Errors
    ///
    /// Fails when no decoder can be constructed for the type.
    fn create_record_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
        extensions: &Extensions,
    ) -> Result<DecoderRef>;

    /// Construct a decoder for an array-like type
    ///
    /// # Errors
    ///
    /// Fails when no decoder can be constructed for the type.
    fn create_array_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
        extensions: &Extensions,
    ) -> Result<DecoderRef>;

    /// Construct a decoder for an enumerated type
    ///
    /// # Errors
    ///
    /// Fails when no decoder can be constructed for the type.
    fn create_enumerated_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
        extensions: &Extensions,
    ) -> Result<DecoderRef>;
}

/// The outward decoder-resolution surface
///
/// Implementations are configured fully before being shared; every method
/// here takes `&self` and mutates nothing, so a frozen
/// `Arc<dyn DecoderFactory>` is safe for unsynchronized concurrent reads.
pub trait DecoderFactory: Send + Sync {
    /// Resolve a decoder for a record-like type
    ///
    /// # Errors
    ///
    /// Fails when neither an override nor the chain can produce a decoder.
    fn create_record_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
    ) -> Result<DecoderRef>;

    /// Resolve a decoder for an array-like type
    ///
    /// # Errors
    ///
    /// Fails when neither an override nor the chain can produce a decoder.
    fn create_array_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
    ) -> Result<DecoderRef>;

    /// Resolve a decoder for an enumerated type
    ///
    /// # Errors
    ///
    /// Fails when neither an override nor the chain can produce a decoder.
    fn create_enumerated_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
    ) -> Result<DecoderRef>;

    /// Produce a new factory that additionally carries `extension`
    ///
    /// Immutable-with-extension: the returned factory contains every
    /// previously registered extension plus the new one, and the receiver
    /// is left untouched. There is deliberately no default body — each
    /// implementation must supply its own construction strategy, so a
    /// factory type carrying extra state can never be silently rebuilt
    /// without it by an inherited copy path.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidExtension`](crate::Error::InvalidExtension)
    /// when the extension is unusable; the receiver is unchanged.
    fn with_extension(
        &self,
        extension: Arc<dyn DecoderExtension>,
    ) -> Result<Arc<dyn DecoderFactory>>;

    /// Resolve a decoder for `category`, routing to the matching entry point
    ///
    /// # Errors
    ///
    /// Fails when neither an override nor the chain can produce a decoder.
    fn create_decoder(
        &self,
        category: DecoderCategory,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
    ) -> Result<DecoderRef> {
        match category {
            DecoderCategory::Record => self.create_record_decoder(config, descriptor, provider),
            DecoderCategory::Array => self.create_array_decoder(config, descriptor, provider),
            DecoderCategory::Enumerated => {
                self.create_enumerated_decoder(config, descriptor, provider)
            }
        }
    }
}
