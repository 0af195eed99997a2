//! Decode-time settings passed through the resolution layer
//!
//! The resolution layer never reads these settings; it hands them to the
//! registered decoder's caller or to the decoding chain unchanged. They are
//! defined here so chains, extensions and decoders share one vocabulary.

use serde::{Deserialize, Serialize};

/// Settings consulted by decoding chains and decoder implementations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Reject record fields that have no declared counterpart
    pub deny_unknown_fields: bool,

    /// Accept scalar representations that convert losslessly (e.g. an
    /// integer where a string is declared)
    pub coerce_scalars: bool,

    /// Match enumerated variant names without regard to case
    pub case_insensitive_variants: bool,
}

impl DecodeConfig {
    /// Create a config with every setting at its default
    pub const fn new() -> Self {
        Self {
            deny_unknown_fields: false,
            coerce_scalars: false,
            case_insensitive_variants: false,
        }
    }
}
