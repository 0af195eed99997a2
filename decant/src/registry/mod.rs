//! Registries populated during the configuration phase
//!
//! Three independent stores: exact-type decoder overrides, mix-in metadata
//! overlays, and the ordered extension list. All of them are mutated only
//! while configuration is single-threaded (`&mut self`) and are frozen,
//! read-only values afterwards.

mod extensions;
mod mixins;
mod overrides;

pub use extensions::{DecoderExtension, Extensions};
pub use mixins::MixinOverlays;
pub use overrides::DecoderOverrides;
