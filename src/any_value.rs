use std::any::{Any, TypeId};
use std::fmt;

/// Object-safe view of a stored payload that can be cloned through the erasure
pub(crate) trait ErasedValue: Any + Send + Sync {
    fn clone_box(&self) -> Box<dyn ErasedValue>;
    fn as_any(&self) -> &dyn Any;
}

impl<T> ErasedValue for T
where
    T: Any + Clone + Send + Sync,
{
    fn clone_box(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A container for type-erased values that preserves type information
pub(crate) struct AnyValue {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    value: Box<dyn ErasedValue>,
}

impl AnyValue {
    /// Create a new AnyValue from any cloneable value that is Send and Sync
    pub(crate) fn new<T: 'static + Clone + Send + Sync>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Check if the contained value is of type T
    pub(crate) fn is_type<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Get a reference to the contained value if it is of type T
    pub(crate) fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        (*self.value).as_any()
    }
}

impl Clone for AnyValue {
    fn clone(&self) -> Self {
        Self {
            type_id: self.type_id,
            type_name: self.type_name,
            value: (*self.value).clone_box(),
        }
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
