//! Newtype wrappers for type identities used throughout the system
//!
//! This module provides two closely related types: [`TypeDescriptor`], the
//! fully-qualified type path exactly as a caller supplies it (possibly
//! carrying generic arguments, e.g. `alloc::vec::Vec<alloc::string::String>`),
//! and [`TypeKey`], the canonical identity derived from a descriptor that the
//! registries use as their map key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fully-qualified type path as supplied by a caller.
///
/// Descriptors are not normalized: `Vec<String>` and `Vec<i64>` are distinct
/// descriptors. They collapse to the same [`TypeKey`] when used against the
/// registries. Paths should be fully qualified (as produced by
/// [`std::any::type_name`]); a bare `Vec` and `alloc::vec::Vec` are
/// different descriptors and produce different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeDescriptor(String);

impl TypeDescriptor {
    /// Create a descriptor from an explicit type path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Create a descriptor for a Rust type using [`std::any::type_name`]
    ///
    /// Works for unsized targets too, so trait objects can be described:
    /// `TypeDescriptor::of::<dyn std::fmt::Debug>()`.
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// Get the underlying path string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeDescriptor {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeDescriptor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical, value-comparable identity for a type, used as a registry key
///
/// A key is derived from a [`TypeDescriptor`] by erasing every balanced
/// angle-bracketed generic-argument list and trimming surrounding
/// whitespace, so two descriptors that denote the same raw type (ignoring
/// generic parameterization) yield equal keys:
///
/// ```
/// use decant::{TypeDescriptor, TypeKey};
///
/// let strings = TypeKey::of(&TypeDescriptor::new("alloc::vec::Vec<alloc::string::String>"));
/// let ints = TypeKey::of(&TypeDescriptor::new("alloc::vec::Vec<i64>"));
/// assert_eq!(strings, ints);
/// assert_eq!(strings.as_str(), "alloc::vec::Vec");
/// ```
///
/// Equality and hashing are structural (string value), never based on
/// runtime object identity, so keys are reproducible across builds and
/// serializable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeKey(String);

impl TypeKey {
    /// Derive the canonical key for a descriptor
    ///
    /// Total, pure and deterministic: the same descriptor always yields the
    /// same key, and there are no error conditions.
    pub fn of(descriptor: &TypeDescriptor) -> Self {
        Self(erase_generics(descriptor.as_str()))
    }

    /// Derive the canonical key for a Rust type
    ///
    /// Shorthand for `TypeKey::of(&TypeDescriptor::of::<T>())`.
    pub fn for_type<T: ?Sized>() -> Self {
        Self::of(&TypeDescriptor::of::<T>())
    }

    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the short name (last segment after ::)
    ///
    /// For example: `money::currency::Money` returns `Money`. Used for
    /// log and error rendering.
    pub fn short_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&TypeDescriptor> for TypeKey {
    fn from(descriptor: &TypeDescriptor) -> Self {
        Self::of(descriptor)
    }
}

/// Erase every balanced `<...>` region from a type path.
///
/// Characters inside an open generic-argument list are dropped, including
/// nested lists. A `>` with no matching opener (as in `fn(A) -> B`) is kept
/// verbatim.
fn erase_generics(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for ch in path.chars() {
        match ch {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_raw_type_yields_equal_keys() {
        let a = TypeKey::of(&TypeDescriptor::new("std::collections::HashMap<String, i64>"));
        let b = TypeKey::of(&TypeDescriptor::new("std::collections::HashMap<i64, Vec<u8>>"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "std::collections::HashMap");
    }

    #[test]
    fn test_non_generic_path_is_unchanged() {
        let key = TypeKey::of(&TypeDescriptor::new("money::currency::Money"));
        assert_eq!(key.as_str(), "money::currency::Money");
    }

    #[test]
    fn test_nested_generics_are_erased_entirely() {
        let key = TypeKey::of(&TypeDescriptor::new(
            "core::option::Option<alloc::vec::Vec<alloc::string::String>>",
        ));
        assert_eq!(key.as_str(), "core::option::Option");
    }

    #[test]
    fn test_tuple_descriptor_keeps_structure() {
        let a = TypeKey::of(&TypeDescriptor::new("(alloc::vec::Vec<u8>, i64)"));
        let b = TypeKey::of(&TypeDescriptor::new("(alloc::vec::Vec<i32>, i64)"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "(alloc::vec::Vec, i64)");
    }

    #[test]
    fn test_unmatched_close_bracket_is_kept() {
        let key = TypeKey::of(&TypeDescriptor::new("fn(i64) -> bool"));
        assert_eq!(key.as_str(), "fn(i64) -> bool");
    }

    #[test]
    fn test_for_type_matches_descriptor_of() {
        assert_eq!(
            TypeKey::for_type::<Vec<String>>(),
            TypeKey::of(&TypeDescriptor::of::<Vec<i64>>())
        );
    }

    #[test]
    fn test_trait_object_descriptor() {
        let key = TypeKey::for_type::<dyn std::fmt::Debug>();
        assert_eq!(key.short_name(), "Debug");
    }

    #[test]
    fn test_key_derivation_is_deterministic() {
        let descriptor = TypeDescriptor::new("alloc::vec::Vec<alloc::string::String>");
        assert_eq!(TypeKey::of(&descriptor), TypeKey::of(&descriptor));
    }

    #[test]
    fn test_short_name() {
        let key = TypeKey::of(&TypeDescriptor::new("money::currency::Money"));
        assert_eq!(key.short_name(), "Money");

        let bare = TypeKey::of(&TypeDescriptor::new("Money"));
        assert_eq!(bare.short_name(), "Money");
    }
}
