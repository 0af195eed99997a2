//! Creation-category discriminator

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// The structural shape a decoder is being created for
///
/// The discriminator selects which entry point of a
/// [`DecoderChain`](crate::DecoderChain) handles a fallback, and nothing
/// more: the override registry is deliberately not partitioned by category,
/// so a single registered mapping satisfies a lookup from any of the three
/// entry points. In practice a concrete type belongs to exactly one
/// category, so no ambiguity arises; the registry performs no check.
///
/// There are intentionally no map-, collection- or tree-shaped categories.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
)]
#[strum(serialize_all = "snake_case")]
pub enum DecoderCategory {
    /// Record-like types: named fields decoded from an object shape
    Record,
    /// Array-like types: ordered elements decoded from a sequence shape
    Array,
    /// Enumerated types: one of a closed set of named variants
    Enumerated,
}
