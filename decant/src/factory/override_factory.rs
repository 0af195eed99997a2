//! The override decoder factory
//!
//! Composes the three configuration registries with a generic decoding
//! chain. Resolution is the same for every creation category: derive the
//! canonical key for the requested type, check the override registry, and
//! either return the registered decoder immediately or hand the request to
//! the chain unchanged. Overrides never merge with chain results — a hit
//! ends resolution.

use std::sync::Arc;

use tracing::trace;

use crate::config::DecodeConfig;
use crate::decoder::DecoderRef;
use crate::error::Result;
use crate::factory::category::DecoderCategory;
use crate::factory::contracts::{DecoderChain, DecoderFactory, DecoderProvider};
use crate::registry::{DecoderExtension, DecoderOverrides, Extensions, MixinOverlays};
use crate::type_key::{TypeDescriptor, TypeKey};

/// Decoder factory with per-type overrides, mix-in overlays and extensions
///
/// The factory is stateful because of its configuration, but thread-safe as
/// long as all configuration is done before sharing it: registration takes
/// `&mut self`, resolution takes `&self`, so a single frozen instance behind
/// an [`Arc`] can serve arbitrarily many concurrent readers with no
/// synchronization.
///
/// A new instance starts with no overrides, no overlays and an empty
/// extension list; everything is added explicitly.
#[derive(Clone)]
pub struct OverrideDecoderFactory {
    chain: Arc<dyn DecoderChain>,
    overrides: DecoderOverrides,
    mixins: MixinOverlays,
    extensions: Extensions,
}

impl OverrideDecoderFactory {
    /// Create a factory that falls back to `chain` on every override miss
    pub fn new(chain: Arc<dyn DecoderChain>) -> Self {
        Self {
            chain,
            overrides: DecoderOverrides::new(),
            mixins: MixinOverlays::new(),
            extensions: Extensions::new(),
        }
    }

    /// Register a decoder for exactly the type identified by `key`
    ///
    /// The mapping is one-to-one: it is never consulted for any other type,
    /// however related. The decoder may produce a narrower runtime type than
    /// the key names — the produced value only has to be acceptable to
    /// whoever requested the key. Registering the same key again replaces
    /// the earlier decoder.
    pub fn register(&mut self, key: TypeKey, decoder: DecoderRef) {
        self.overrides.register(key, decoder);
    }

    /// Register a decoder for the Rust type `T`
    ///
    /// Shorthand for [`register`](Self::register) with
    /// [`TypeKey::for_type::<T>()`](TypeKey::for_type). `T` may be unsized,
    /// so trait objects are valid targets.
    pub fn register_for<T: ?Sized>(&mut self, decoder: DecoderRef) {
        self.register(TypeKey::for_type::<T>(), decoder);
    }

    /// Record that `destination` takes supplemental metadata from `source`
    ///
    /// Consulted by the introspection engine when it examines
    /// `destination`'s structure; this factory only stores the association.
    pub fn set_mixin(&mut self, destination: TypeKey, source: TypeKey) {
        self.mixins.set_overlay(destination, source);
    }

    /// Record a mix-in overlay for the Rust types `D` and `S`
    pub fn set_mixin_for<D: ?Sized, S: ?Sized>(&mut self) {
        self.set_mixin(TypeKey::for_type::<D>(), TypeKey::for_type::<S>());
    }

    /// Get the metadata-source key recorded for `destination`, if any
    pub fn mixin_source(&self, destination: &TypeKey) -> Option<&TypeKey> {
        self.mixins.overlay_for(destination)
    }

    /// The exact-type override registry
    pub fn overrides(&self) -> &DecoderOverrides {
        &self.overrides
    }

    /// The mix-in overlay registry
    pub fn mixins(&self) -> &MixinOverlays {
        &self.mixins
    }

    /// The registered extensions, in registration order
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Produce a new factory carrying every current extension plus
    /// `extension`
    ///
    /// The receiver is untouched on both paths; the override and overlay
    /// registries are carried over as-is (they are not extension-dependent).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtension`](crate::Error::InvalidExtension)
    /// when the extension is unusable.
    pub fn with_extension(&self, extension: Arc<dyn DecoderExtension>) -> Result<Self> {
        let extensions = self.extensions.with(extension)?;
        Ok(Self {
            chain: Arc::clone(&self.chain),
            overrides: self.overrides.clone(),
            mixins: self.mixins.clone(),
            extensions,
        })
    }

    /// Check the override registry for `descriptor`
    fn override_for(
        &self,
        category: DecoderCategory,
        descriptor: &TypeDescriptor,
    ) -> Option<DecoderRef> {
        let key = TypeKey::of(descriptor);
        match self.overrides.lookup(&key) {
            Some(decoder) => {
                trace!("Override hit for '{key}' ({category})");
                Some(Arc::clone(decoder))
            }
            None => {
                trace!("Override miss for '{key}' ({category}), delegating to chain");
                None
            }
        }
    }
}

impl DecoderFactory for OverrideDecoderFactory {
    fn create_record_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
    ) -> Result<DecoderRef> {
        if let Some(decoder) = self.override_for(DecoderCategory::Record, descriptor) {
            return Ok(decoder);
        }
        self.chain
            .create_record_decoder(config, descriptor, provider, &self.extensions)
    }

    fn create_array_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
    ) -> Result<DecoderRef> {
        if let Some(decoder) = self.override_for(DecoderCategory::Array, descriptor) {
            return Ok(decoder);
        }
        self.chain
            .create_array_decoder(config, descriptor, provider, &self.extensions)
    }

    fn create_enumerated_decoder(
        &self,
        config: &DecodeConfig,
        descriptor: &TypeDescriptor,
        provider: &dyn DecoderProvider,
    ) -> Result<DecoderRef> {
        if let Some(decoder) = self.override_for(DecoderCategory::Enumerated, descriptor) {
            return Ok(decoder);
        }
        self.chain
            .create_enumerated_decoder(config, descriptor, provider, &self.extensions)
    }

    fn with_extension(
        &self,
        extension: Arc<dyn DecoderExtension>,
    ) -> Result<Arc<dyn DecoderFactory>> {
        Ok(Arc::new(Self::with_extension(self, extension)?))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic, reason = "test code")]

    use serde_json::Value;

    use super::*;
    use crate::decoder::{DecodedValue, Decoder};
    use crate::error::Error;

    /// Decoder whose output identifies where it came from
    struct TagDecoder(String);

    impl TagDecoder {
        fn shared(tag: impl Into<String>) -> DecoderRef {
            Arc::new(Self(tag.into()))
        }
    }

    impl Decoder for TagDecoder {
        fn decode(&self, _input: &Value, _config: &DecodeConfig) -> Result<DecodedValue> {
            Ok(Box::new(self.0.clone()))
        }
    }

    /// Chain that consults extensions, then constructs a tagged decoder
    struct StubChain;

    impl StubChain {
        fn fallback(category: DecoderCategory, descriptor: &TypeDescriptor) -> DecoderRef {
            TagDecoder::shared(format!("chain:{category}:{}", TypeKey::of(descriptor)))
        }
    }

    impl DecoderChain for StubChain {
        fn create_record_decoder(
            &self,
            config: &DecodeConfig,
            descriptor: &TypeDescriptor,
            _provider: &dyn DecoderProvider,
            extensions: &Extensions,
        ) -> Result<DecoderRef> {
            for extension in extensions.iter() {
                if let Some(decoder) = extension.find_record_decoder(config, descriptor) {
                    return Ok(decoder);
                }
            }
            Ok(Self::fallback(DecoderCategory::Record, descriptor))
        }

        fn create_array_decoder(
            &self,
            config: &DecodeConfig,
            descriptor: &TypeDescriptor,
            _provider: &dyn DecoderProvider,
            extensions: &Extensions,
        ) -> Result<DecoderRef> {
            for extension in extensions.iter() {
                if let Some(decoder) = extension.find_array_decoder(config, descriptor) {
                    return Ok(decoder);
                }
            }
            Ok(Self::fallback(DecoderCategory::Array, descriptor))
        }

        fn create_enumerated_decoder(
            &self,
            config: &DecodeConfig,
            descriptor: &TypeDescriptor,
            _provider: &dyn DecoderProvider,
            extensions: &Extensions,
        ) -> Result<DecoderRef> {
            for extension in extensions.iter() {
                if let Some(decoder) = extension.find_enumerated_decoder(config, descriptor) {
                    return Ok(decoder);
                }
            }
            Ok(Self::fallback(DecoderCategory::Enumerated, descriptor))
        }
    }

    /// Chain that cannot construct anything
    struct FailingChain;

    impl DecoderChain for FailingChain {
        fn create_record_decoder(
            &self,
            _config: &DecodeConfig,
            descriptor: &TypeDescriptor,
            _provider: &dyn DecoderProvider,
            _extensions: &Extensions,
        ) -> Result<DecoderRef> {
            Err(Error::unconstructible(TypeKey::of(descriptor)).into())
        }

        fn create_array_decoder(
            &self,
            _config: &DecodeConfig,
            descriptor: &TypeDescriptor,
            _provider: &dyn DecoderProvider,
            _extensions: &Extensions,
        ) -> Result<DecoderRef> {
            Err(Error::unconstructible(TypeKey::of(descriptor)).into())
        }

        fn create_enumerated_decoder(
            &self,
            _config: &DecodeConfig,
            descriptor: &TypeDescriptor,
            _provider: &dyn DecoderProvider,
            _extensions: &Extensions,
        ) -> Result<DecoderRef> {
            Err(Error::unconstructible(TypeKey::of(descriptor)).into())
        }
    }

    /// Provider stub for tests that never resolve nested types
    struct NullProvider;

    impl DecoderProvider for NullProvider {
        fn decoder_for(
            &self,
            _config: &DecodeConfig,
            descriptor: &TypeDescriptor,
        ) -> Result<DecoderRef> {
            Err(Error::unconstructible(TypeKey::of(descriptor)).into())
        }
    }

    /// Extension offering a tagged decoder for exactly one record type
    struct RecordExtension {
        name: &'static str,
        target: TypeKey,
    }

    impl DecoderExtension for RecordExtension {
        fn name(&self) -> &str {
            self.name
        }

        fn find_record_decoder(
            &self,
            _config: &DecodeConfig,
            descriptor: &TypeDescriptor,
        ) -> Option<DecoderRef> {
            (TypeKey::of(descriptor) == self.target)
                .then(|| TagDecoder::shared(format!("ext:{}", self.name)))
        }
    }

    /// Extension that reports a blank name
    struct BlankExtension;

    impl DecoderExtension for BlankExtension {
        fn name(&self) -> &str {
            ""
        }
    }

    fn tag(decoder: &DecoderRef) -> String {
        let decoded = decoder.decode(&Value::Null, &DecodeConfig::new()).unwrap();
        *decoded.downcast::<String>().unwrap()
    }

    fn resolve(
        factory: &OverrideDecoderFactory,
        category: DecoderCategory,
        descriptor: &TypeDescriptor,
    ) -> String {
        let decoder = factory
            .create_decoder(category, &DecodeConfig::new(), descriptor, &NullProvider)
            .unwrap();
        tag(&decoder)
    }

    fn money() -> TypeDescriptor {
        TypeDescriptor::new("money::currency::Money")
    }

    #[test]
    fn test_override_wins_in_every_category() {
        let mut factory = OverrideDecoderFactory::new(Arc::new(StubChain));
        factory.register(TypeKey::of(&money()), TagDecoder::shared("override"));

        for category in [
            DecoderCategory::Record,
            DecoderCategory::Array,
            DecoderCategory::Enumerated,
        ] {
            assert_eq!(resolve(&factory, category, &money()), "override");
        }
    }

    #[test]
    fn test_override_wins_over_registered_extensions() {
        let mut factory = OverrideDecoderFactory::new(Arc::new(StubChain));
        factory.register(TypeKey::of(&money()), TagDecoder::shared("override"));
        let factory = factory
            .with_extension(Arc::new(RecordExtension {
                name: "money-ext",
                target: TypeKey::of(&money()),
            }))
            .unwrap();

        assert_eq!(resolve(&factory, DecoderCategory::Record, &money()), "override");
    }

    #[test]
    fn test_miss_matches_direct_chain_call() {
        let factory = OverrideDecoderFactory::new(Arc::new(StubChain));
        let config = DecodeConfig::new();
        let descriptor = TypeDescriptor::new("shop::Price");

        let through_facade = factory
            .create_record_decoder(&config, &descriptor, &NullProvider)
            .unwrap();
        let direct = StubChain
            .create_record_decoder(&config, &descriptor, &NullProvider, &Extensions::new())
            .unwrap();

        assert_eq!(tag(&through_facade), tag(&direct));
        assert_eq!(tag(&through_facade), "chain:record:shop::Price");
    }

    #[test]
    fn test_generic_descriptors_hit_the_same_override() {
        let mut factory = OverrideDecoderFactory::new(Arc::new(StubChain));
        factory.register_for::<Vec<i64>>(TagDecoder::shared("any-vec"));

        let descriptor = TypeDescriptor::of::<Vec<String>>();
        assert_eq!(resolve(&factory, DecoderCategory::Array, &descriptor), "any-vec");
    }

    #[test]
    fn test_with_extension_reaches_the_chain() {
        let target = TypeDescriptor::new("shop::Price");
        let base = OverrideDecoderFactory::new(Arc::new(StubChain));
        let extended = base
            .with_extension(Arc::new(RecordExtension {
                name: "price-ext",
                target: TypeKey::of(&target),
            }))
            .unwrap();

        assert_eq!(
            resolve(&extended, DecoderCategory::Record, &target),
            "ext:price-ext"
        );
        // The original factory never sees the extension.
        assert_eq!(
            resolve(&base, DecoderCategory::Record, &target),
            "chain:record:shop::Price"
        );
        assert!(base.extensions().is_empty());
        assert_eq!(extended.extensions().len(), 1);
    }

    #[test]
    fn test_with_extension_carries_overrides_and_mixins() {
        let mut base = OverrideDecoderFactory::new(Arc::new(StubChain));
        base.register(TypeKey::of(&money()), TagDecoder::shared("override"));
        base.set_mixin(
            TypeKey::of(&TypeDescriptor::new("api::PublicApiView")),
            TypeKey::of(&TypeDescriptor::new("api::InternalAnnotations")),
        );

        let extended = base
            .with_extension(Arc::new(RecordExtension {
                name: "ext",
                target: TypeKey::of(&TypeDescriptor::new("shop::Price")),
            }))
            .unwrap();

        assert_eq!(resolve(&extended, DecoderCategory::Record, &money()), "override");
        assert_eq!(
            extended.mixin_source(&TypeKey::of(&TypeDescriptor::new("api::PublicApiView"))),
            Some(&TypeKey::of(&TypeDescriptor::new("api::InternalAnnotations")))
        );
    }

    #[test]
    fn test_invalid_extension_leaves_factory_untouched() {
        let mut factory = OverrideDecoderFactory::new(Arc::new(StubChain));
        factory.register(TypeKey::of(&money()), TagDecoder::shared("override"));

        let report = factory.with_extension(Arc::new(BlankExtension)).err().unwrap();
        assert!(matches!(
            report.current_context(),
            Error::InvalidExtension(_)
        ));

        // Prior state is fully intact.
        assert!(factory.extensions().is_empty());
        assert_eq!(resolve(&factory, DecoderCategory::Record, &money()), "override");
    }

    #[test]
    fn test_chain_errors_propagate_unchanged() {
        let factory = OverrideDecoderFactory::new(Arc::new(FailingChain));
        let descriptor = TypeDescriptor::new("shop::Price");

        let report = factory
            .create_enumerated_decoder(&DecodeConfig::new(), &descriptor, &NullProvider)
            .err()
            .unwrap();

        match report.current_context() {
            Error::Unconstructible { type_key } => {
                assert_eq!(type_key, &TypeKey::of(&descriptor));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_override_still_wins_when_chain_fails() {
        let mut factory = OverrideDecoderFactory::new(Arc::new(FailingChain));
        factory.register(TypeKey::of(&money()), TagDecoder::shared("override"));

        assert_eq!(resolve(&factory, DecoderCategory::Record, &money()), "override");
    }

    #[test]
    fn test_create_decoder_routes_by_category() {
        let factory = OverrideDecoderFactory::new(Arc::new(StubChain));
        let descriptor = TypeDescriptor::new("shop::Price");

        assert_eq!(
            resolve(&factory, DecoderCategory::Record, &descriptor),
            "chain:record:shop::Price"
        );
        assert_eq!(
            resolve(&factory, DecoderCategory::Array, &descriptor),
            "chain:array:shop::Price"
        );
        assert_eq!(
            resolve(&factory, DecoderCategory::Enumerated, &descriptor),
            "chain:enumerated:shop::Price"
        );
    }

    #[test]
    fn test_trait_object_factory_surface() {
        let mut concrete = OverrideDecoderFactory::new(Arc::new(StubChain));
        concrete.register(TypeKey::of(&money()), TagDecoder::shared("override"));

        let factory: Arc<dyn DecoderFactory> = Arc::new(concrete);
        let extended = factory
            .with_extension(Arc::new(RecordExtension {
                name: "ext",
                target: TypeKey::of(&TypeDescriptor::new("shop::Price")),
            }))
            .unwrap();

        let decoder = extended
            .create_record_decoder(&DecodeConfig::new(), &money(), &NullProvider)
            .unwrap();
        assert_eq!(tag(&decoder), "override");
    }

    #[test]
    fn test_concurrent_reads_match_sequential_baseline() {
        let mut factory = OverrideDecoderFactory::new(Arc::new(StubChain));
        factory.register(TypeKey::of(&money()), TagDecoder::shared("override"));
        let factory = factory
            .with_extension(Arc::new(RecordExtension {
                name: "price-ext",
                target: TypeKey::of(&TypeDescriptor::new("shop::Price")),
            }))
            .unwrap();

        let requests = [
            (DecoderCategory::Record, TypeDescriptor::new("money::currency::Money")),
            (DecoderCategory::Record, TypeDescriptor::new("shop::Price")),
            (DecoderCategory::Array, TypeDescriptor::new("alloc::vec::Vec<i64>")),
            (DecoderCategory::Enumerated, TypeDescriptor::new("shop::Color")),
        ];

        let baseline: Vec<String> = requests
            .iter()
            .map(|(category, descriptor)| resolve(&factory, *category, descriptor))
            .collect();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for ((category, descriptor), expected) in requests.iter().zip(&baseline) {
                        assert_eq!(&resolve(&factory, *category, descriptor), expected);
                    }
                });
            }
        });
    }
}
