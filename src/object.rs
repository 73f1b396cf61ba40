use crate::variant::Variant;
use async_trait::async_trait;
use std::sync::{Arc, Weak};

#[cfg(any(test, feature = "test-support"))]
use mockall::automock;

/// An array- or property-bag-shaped object owned by the caller's side
///
/// Container conversions read through this trait. Every accessor may need a
/// round trip to wherever the object lives, so all of them are async.
///
/// A missing element or property is reported as an empty [`Variant`].
#[cfg_attr(any(test, feature = "test-support"), automock)]
#[async_trait]
pub trait ExternalObject: Send + Sync {
    /// Number of indexed elements.
    async fn length(&self) -> usize;

    /// The element at `index`, where `index < length()`.
    async fn element(&self, index: usize) -> Variant;

    /// Enumerable string keys, in the object's enumeration order.
    async fn keys(&self) -> Vec<String>;

    /// The value stored under `key`.
    async fn property(&self, key: &str) -> Variant;
}

/// Shared handle to an external object, as stored in a `Variant`.
pub type ObjectRef = Arc<dyn ExternalObject>;

/// Weak handle to an external object, as stored in a `Variant`.
pub type WeakObjectRef = Weak<dyn ExternalObject>;

impl From<ObjectRef> for Variant {
    fn from(value: ObjectRef) -> Self {
        Variant::from_shared(value)
    }
}

impl From<WeakObjectRef> for Variant {
    fn from(value: WeakObjectRef) -> Self {
        Variant::from_weak(value)
    }
}
