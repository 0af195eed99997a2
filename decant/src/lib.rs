//! Per-type decoder overrides in front of a generic decoding chain
//!
//! `decant` is the configuration and resolution layer that sits between
//! callers asking for a decoder and the generic construction chain that
//! usually builds one. It adds three facilities on top of any
//! [`DecoderChain`]:
//!
//! - **Exact-type overrides** — "use this decoder for this type, and only
//!   this type". Checked before the chain runs, for all three creation
//!   categories (record-like, array-like, enumerated). Deliberately not
//!   applied to related types: generalizing across a hierarchy is the
//!   chain's job.
//! - **Mix-in overlays** — "when introspecting type A's structure, also
//!   consider the metadata declared for type B". Pure storage; the
//!   introspection engine that consumes the overlay decides how metadata
//!   combines and whether supertypes are walked.
//! - **Extensions** — pluggable providers of additional decoder
//!   construction logic, accumulated loss-free across
//!   [`with_extension`](OverrideDecoderFactory::with_extension) calls and
//!   consulted by the chain, not by this layer.
//!
//! # Lifecycle
//!
//! A factory has two strict phases. During **configuration** it is mutated
//! through `&mut self` registration calls — exclusive access, hence
//! single-threaded, enforced by the borrow checker. Once configuration is
//! done the factory is logically frozen: every resolution method takes
//! `&self` and mutates nothing, so one instance behind an [`Arc`] serves
//! arbitrarily many concurrent readers without synchronization.
//!
//! [`Arc`]: std::sync::Arc
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use decant::{
//!     DecodeConfig, DecodedValue, Decoder, DecoderChain, DecoderFactory, DecoderProvider,
//!     DecoderRef, Error, Extensions, OverrideDecoderFactory, Result, TypeDescriptor, TypeKey,
//! };
//! use serde_json::{Value, json};
//!
//! struct Money {
//!     minor_units: i64,
//! }
//!
//! /// Decodes `Money` from `{ "minor_units": … }` objects.
//! struct MoneyDecoder;
//!
//! impl Decoder for MoneyDecoder {
//!     fn decode(&self, input: &Value, _config: &DecodeConfig) -> Result<DecodedValue> {
//!         let minor_units = input["minor_units"]
//!             .as_i64()
//!             .ok_or_else(|| Error::decode_failed("Money", "missing minor_units"))?;
//!         Ok(Box::new(Money { minor_units }))
//!     }
//! }
//! #
//! # struct NoChain;
//! # impl DecoderChain for NoChain {
//! #     fn create_record_decoder(
//! #         &self,
//! #         _: &DecodeConfig,
//! #         d: &TypeDescriptor,
//! #         _: &dyn DecoderProvider,
//! #         _: &Extensions,
//! #     ) -> Result<DecoderRef> {
//! #         Err(Error::unconstructible(TypeKey::of(d)).into())
//! #     }
//! #     fn create_array_decoder(
//! #         &self,
//! #         _: &DecodeConfig,
//! #         d: &TypeDescriptor,
//! #         _: &dyn DecoderProvider,
//! #         _: &Extensions,
//! #     ) -> Result<DecoderRef> {
//! #         Err(Error::unconstructible(TypeKey::of(d)).into())
//! #     }
//! #     fn create_enumerated_decoder(
//! #         &self,
//! #         _: &DecodeConfig,
//! #         d: &TypeDescriptor,
//! #         _: &dyn DecoderProvider,
//! #         _: &Extensions,
//! #     ) -> Result<DecoderRef> {
//! #         Err(Error::unconstructible(TypeKey::of(d)).into())
//! #     }
//! # }
//! # struct NoProvider;
//! # impl DecoderProvider for NoProvider {
//! #     fn decoder_for(&self, _: &DecodeConfig, d: &TypeDescriptor) -> Result<DecoderRef> {
//! #         Err(Error::unconstructible(TypeKey::of(d)).into())
//! #     }
//! # }
//! #
//! # fn main() -> Result<()> {
//! let mut factory = OverrideDecoderFactory::new(Arc::new(NoChain));
//! factory.register_for::<Money>(Arc::new(MoneyDecoder));
//!
//! // Configuration done — freeze and share.
//! let factory = Arc::new(factory);
//! let decoder = factory.create_record_decoder(
//!     &DecodeConfig::new(),
//!     &TypeDescriptor::of::<Money>(),
//!     &NoProvider,
//! )?;
//!
//! let value = decoder.decode(&json!({ "minor_units": 1250 }), &DecodeConfig::new())?;
//! let money = value.downcast::<Money>().expect("registered for Money");
//! assert_eq!(money.minor_units, 1250);
//! # Ok(())
//! # }
//! ```
//!
//! # What this crate is not
//!
//! The generic record/array/enum construction logic, the metadata
//! introspection engine, and wire-level parsing all live elsewhere; this
//! crate only defines the contracts it needs from them ([`DecoderChain`],
//! [`DecoderProvider`]) and stores what they consult. There is no support
//! for map-, collection- or tree-shaped creation categories.

mod config;
mod decoder;
mod error;
mod factory;
mod registry;
mod type_key;

pub use config::DecodeConfig;
pub use decoder::{DecodedValue, Decoder, DecoderRef};
pub use error::{Error, Result};
pub use factory::{
    DecoderCategory, DecoderChain, DecoderFactory, DecoderProvider, OverrideDecoderFactory,
};
pub use registry::{DecoderExtension, DecoderOverrides, Extensions, MixinOverlays};
pub use type_key::{TypeDescriptor, TypeKey};
