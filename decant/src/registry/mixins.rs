//! Mix-in metadata overlays
//!
//! An overlay records that when type A's structure is introspected, the
//! metadata declared for type B should also be considered — conceptually,
//! B's declarations are injected between A and whatever specializes A. This
//! store holds the associations and nothing else: it does not decide how
//! the two metadata sets combine, nor whether the introspection engine
//! walks A's supertypes and asks again for each of them. That traversal, if
//! any, belongs entirely to the introspection collaborator.

use std::collections::HashMap;

use tracing::debug;

use crate::type_key::TypeKey;

/// Registry of mix-in overlays: destination key to metadata-source key
#[derive(Default, Clone)]
pub struct MixinOverlays {
    entries: HashMap<TypeKey, TypeKey>,
}

impl MixinOverlays {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `destination` takes supplemental metadata from `source`
    ///
    /// A later overlay for the same destination replaces the earlier one
    /// (last-write-wins). Configuration-phase only.
    pub fn set_overlay(&mut self, destination: TypeKey, source: TypeKey) {
        debug!("Mix-in overlay: '{destination}' takes metadata from '{source}'");
        self.entries.insert(destination, source);
    }

    /// Get the metadata-source key for `destination`, if one is recorded
    pub fn overlay_for(&self, destination: &TypeKey) -> Option<&TypeKey> {
        self.entries.get(destination)
    }

    /// Number of recorded overlays
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any overlay is recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(destination, source)` pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&TypeKey, &TypeKey)> {
        self.entries.iter()
    }
}
