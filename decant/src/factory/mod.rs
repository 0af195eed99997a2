//! Decoder resolution: collaborator contracts and the override facade

mod category;
mod contracts;
mod override_factory;

pub use category::DecoderCategory;
pub use contracts::{DecoderChain, DecoderFactory, DecoderProvider};
pub use override_factory::OverrideDecoderFactory;
