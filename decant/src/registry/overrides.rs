//! Direct mappings used for exact type matches
//!
//! Mappings are one-to-one: a decoder registered for a key applies to that
//! key and nothing else. Subtype-style resolution is exactly what the
//! decoding chain is for, and conflating the two would make override
//! behavior unpredictable — a decoder registered for a trait must not
//! silently apply to an unrelated implementer. The store is also not
//! partitioned by creation category: one entry satisfies a lookup from any
//! of the record, array or enumerated entry points.

use std::collections::HashMap;

use tracing::debug;

use crate::decoder::DecoderRef;
use crate::type_key::TypeKey;

/// Registry of exact-type decoder overrides, keyed by [`TypeKey`]
#[derive(Default, Clone)]
pub struct DecoderOverrides {
    entries: HashMap<TypeKey, DecoderRef>,
}

impl DecoderOverrides {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the decoder for `key`
    ///
    /// A later registration for the same key replaces the earlier one
    /// (last-write-wins). Must only be called during the single-threaded
    /// configuration phase; the `&mut self` receiver makes that a
    /// compile-time property for shared instances.
    pub fn register(&mut self, key: TypeKey, decoder: DecoderRef) {
        if self.entries.insert(key.clone(), decoder).is_some() {
            debug!("Replaced decoder override for '{key}'");
        } else {
            debug!("Registered decoder override for '{key}'");
        }
    }

    /// Get the registered decoder for `key`, if any
    ///
    /// O(1) expected, pure read. A miss is not an error — it is the signal
    /// to fall through to the decoding chain.
    pub fn lookup(&self, key: &TypeKey) -> Option<&DecoderRef> {
        self.entries.get(key)
    }

    /// Number of registered overrides
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any override is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.entries.keys()
    }
}
