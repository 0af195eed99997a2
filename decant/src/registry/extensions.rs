//! Pluggable decoder-provider extensions
//!
//! Extensions contribute additional decoder-construction logic to a
//! decoding chain. The resolution layer itself never interprets them: it
//! only guarantees safe, loss-free accumulation across `with` calls and
//! hands the list to the chain at each delegation, which consults the
//! entries under its own contract (conventionally first-registered,
//! first-consulted).

use std::sync::Arc;

use tracing::debug;

use crate::config::DecodeConfig;
use crate::decoder::DecoderRef;
use crate::error::{Error, Result};
use crate::type_key::TypeDescriptor;

/// A pluggable provider of decoder-construction logic
///
/// The contribution hooks default to `None` so an extension only implements
/// the creation categories it cares about. Hooks are called by decoding
/// chains, never by the resolution layer.
pub trait DecoderExtension: Send + Sync {
    /// Identity used in diagnostics and registration validation
    ///
    /// A blank name marks the extension as unusable and registration
    /// rejects it.
    fn name(&self) -> &str;

    /// Offer a decoder for a record-like type
    fn find_record_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
    ) -> Option<DecoderRef> {
        let _ = (config, descriptor);
        None
    }

    /// Offer a decoder for an array-like type
    fn find_array_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
    ) -> Option<DecoderRef> {
        let _ = (config, descriptor);
        None
    }

    /// Offer a decoder for an enumerated type
    fn find_enumerated_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
    ) -> Option<DecoderRef> {
        let _ = (config, descriptor);
        None
    }
}

/// Ordered, append-only collection of decoder extensions
///
/// Extending never mutates in place: [`Extensions::with`] validates the new
/// entry, copies the list and appends, leaving the original value — and
/// every facade built on it — untouched. Cloning is shallow (one `Arc`
/// clone per entry).
#[derive(Default, Clone)]
pub struct Extensions {
    entries: Vec<Arc<dyn DecoderExtension>>,
}

impl Extensions {
    /// Create an empty extension list
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a new list containing every current entry plus `extension`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtension`] when the extension reports a
    /// blank name. The current list is untouched on both paths.
    pub fn with(&self, extension: Arc<dyn DecoderExtension>) -> Result<Self> {
        if extension.name().trim().is_empty() {
            return Err(Error::invalid_extension(
                "extension reports a blank name and cannot be registered",
            )
            .into());
        }
        debug!("Appending decoder extension '{}'", extension.name());

        let mut entries = self.entries.clone();
        entries.push(extension);
        Ok(Self { entries })
    }

    /// Iterate over the extensions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DecoderExtension>> {
        self.entries.iter()
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
