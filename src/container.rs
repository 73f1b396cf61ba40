//! Conversion of structured values into Rust containers.
//!
//! Sequences (`Vec`, `VecDeque`) are read from array-shaped sources and
//! mappings (`BTreeMap`, `HashMap` with `String` keys) from property bags.
//! Reading an [`ExternalObject`] may take a round trip per element, so these
//! conversions are returned as a [`ConversionFuture`] instead of blocking.

use crate::convert::Convertible;
use crate::error::CastError;
use crate::object::{ExternalObject, ObjectRef, WeakObjectRef};
use crate::sentinel::Null;
use crate::text::WideString;
use crate::variant::{Variant, VariantType};
use futures_util::future::{self, BoxFuture, FutureExt};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

/// Pending result of a container conversion.
///
/// Resolves to the assembled container, or to the first element failure.
pub type ConversionFuture<T> = BoxFuture<'static, Result<T, CastError>>;

/// Upper bound on element reads in flight against one external object.
pub(crate) const MAX_PENDING_ELEMENTS: usize = 16;

/// Where the elements of a container conversion come from
#[derive(Clone)]
pub enum StructuredSource {
    /// A live external object.
    Object(ObjectRef),
    /// A list of variants that is already in memory.
    List(Vec<Variant>),
    /// A string-keyed dictionary of variants that is already in memory.
    Dict(BTreeMap<String, Variant>),
}

impl StructuredSource {
    fn from_variant(value: &Variant) -> Result<Self, CastError> {
        if let Ok(object) = value.cast_ref::<ObjectRef>() {
            return Ok(StructuredSource::Object(Arc::clone(object)));
        }
        if let Ok(weak) = value.cast_ref::<WeakObjectRef>() {
            return weak.upgrade().map(StructuredSource::Object).ok_or_else(|| {
                CastError::new(value.get_type(), VariantType::of::<ObjectRef>())
                    .with_message("the referenced object has been released")
            });
        }
        if let Ok(list) = value.cast_ref::<Vec<Variant>>() {
            return Ok(StructuredSource::List(list.clone()));
        }
        if let Ok(dict) = value.cast_ref::<BTreeMap<String, Variant>>() {
            return Ok(StructuredSource::Dict(dict.clone()));
        }
        Err(CastError::new(value.get_type(), VariantType::of::<ObjectRef>())
            .with_message("value is not a structured object"))
    }

    fn type_of(&self) -> VariantType {
        match self {
            StructuredSource::Object(_) => VariantType::of::<ObjectRef>(),
            StructuredSource::List(_) => VariantType::of::<Vec<Variant>>(),
            StructuredSource::Dict(_) => VariantType::of::<BTreeMap<String, Variant>>(),
        }
    }
}

/// A type that can be used as an element of a converted container
///
/// Scalars convert synchronously; nested containers recurse into their own
/// structured source.
pub trait ElementConvertible: Sized + Clone + Send + 'static {
    /// Converts one element taken out of a structured source.
    fn convert_element(value: Variant) -> ConversionFuture<Self>;
}

/// A container type that can be assembled from a structured source
pub trait ContainerConvertible: Sized + Clone + Send + 'static {
    /// Reads every element of `source` into a new container.
    fn from_source(source: StructuredSource) -> ConversionFuture<Self>;
}

impl Variant {
    /// Converts a structured value into the container `C`.
    ///
    /// The stored value must be an external object (or a weak reference to
    /// a live one), a `Vec<Variant>`, or a `BTreeMap<String, Variant>`. Every
    /// element is converted into `C`'s element type, and the first failing
    /// element fails the whole conversion. No partial container is ever
    /// produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// let list = Variant::from(vec![Variant::from("1"), Variant::from(2u8)]);
    /// let numbers = futures_util::FutureExt::now_or_never(
    ///     list.convert_cast_container::<Vec<i64>>(),
    /// );
    /// assert_eq!(numbers, Some(Ok(vec![1, 2])));
    /// ```
    pub fn convert_cast_container<C: ContainerConvertible>(&self) -> ConversionFuture<C> {
        if let Ok(value) = self.cast_ref::<C>() {
            return future::ready(Ok(value.clone())).boxed();
        }
        match StructuredSource::from_variant(self) {
            Ok(source) => C::from_source(source),
            Err(err) => {
                let err = CastError::new(err.from_type(), VariantType::of::<C>())
                    .with_message(err.message().unwrap_or_default());
                tracing::debug!(from = %err.from_type(), to = %err.to_type(), "container conversion failed");
                future::ready(Err(err)).boxed()
            }
        }
    }
}

async fn collect_sequence<T: ElementConvertible>(
    source: StructuredSource,
    target: VariantType,
) -> Result<Vec<T>, CastError> {
    match source {
        StructuredSource::Object(object) => {
            // the reported length is not trusted for allocation
            let len = object.length().await;
            tracing::debug!(len, target = %target, "converting array object");
            stream::iter(0..len)
                .map(move |index| {
                    let object = Arc::clone(&object);
                    async move {
                        let element = object.element(index).await;
                        T::convert_element(element)
                            .await
                            .inspect_err(|err| tracing::debug!(index, error = %err, "array element conversion failed"))
                    }
                })
                .buffered(MAX_PENDING_ELEMENTS)
                .try_collect::<Vec<T>>()
                .await
        }
        StructuredSource::List(items) => {
            tracing::trace!(len = items.len(), target = %target, "converting variant list");
            future::try_join_all(items.into_iter().map(T::convert_element)).await
        }
        source @ StructuredSource::Dict(_) => Err(CastError::new(source.type_of(), target)
            .with_message("a dictionary cannot be converted into a sequence")),
    }
}

async fn collect_mapping<T: ElementConvertible>(
    source: StructuredSource,
    target: VariantType,
) -> Result<Vec<(String, T)>, CastError> {
    match source {
        StructuredSource::Object(object) => {
            let keys = object.keys().await;
            tracing::trace!(keys = keys.len(), target = %target, "converting property bag");
            stream::iter(keys)
                .map(move |key| {
                    let object = Arc::clone(&object);
                    async move { property_entry::<T>(object.as_ref(), key).await }
                })
                .buffered(MAX_PENDING_ELEMENTS)
                .try_collect::<Vec<(String, T)>>()
                .await
        }
        StructuredSource::Dict(entries) => {
            tracing::trace!(keys = entries.len(), target = %target, "converting variant dictionary");
            let pending = entries.into_iter().map(|(key, value)| async move {
                T::convert_element(value).await.map(|value| (key, value))
            });
            future::try_join_all(pending).await
        }
        source @ StructuredSource::List(_) => Err(CastError::new(source.type_of(), target)
            .with_message("a list cannot be converted into a mapping")),
    }
}

async fn property_entry<T: ElementConvertible>(
    object: &dyn ExternalObject,
    key: String,
) -> Result<(String, T), CastError> {
    let value = object.property(&key).await;
    match T::convert_element(value).await {
        Ok(value) => Ok((key, value)),
        Err(err) => {
            tracing::debug!(key = %key, error = %err, "property conversion failed");
            Err(err)
        }
    }
}

impl<T: ElementConvertible> ContainerConvertible for Vec<T> {
    fn from_source(source: StructuredSource) -> ConversionFuture<Self> {
        collect_sequence(source, VariantType::of::<Self>()).boxed()
    }
}

impl<T: ElementConvertible> ContainerConvertible for VecDeque<T> {
    fn from_source(source: StructuredSource) -> ConversionFuture<Self> {
        collect_sequence::<T>(source, VariantType::of::<Self>())
            .map(|items| items.map(VecDeque::from))
            .boxed()
    }
}

impl<T: ElementConvertible> ContainerConvertible for BTreeMap<String, T> {
    fn from_source(source: StructuredSource) -> ConversionFuture<Self> {
        collect_mapping::<T>(source, VariantType::of::<Self>())
            .map(|entries| entries.map(|entries| entries.into_iter().collect::<Self>()))
            .boxed()
    }
}

impl<T: ElementConvertible> ContainerConvertible for HashMap<String, T> {
    fn from_source(source: StructuredSource) -> ConversionFuture<Self> {
        collect_mapping::<T>(source, VariantType::of::<Self>())
            .map(|entries| entries.map(|entries| entries.into_iter().collect::<Self>()))
            .boxed()
    }
}

macro_rules! impl_element_scalar {
    ($($t:ty),*) => {$(
        impl ElementConvertible for $t {
            fn convert_element(value: Variant) -> ConversionFuture<Self> {
                future::ready(value.convert_cast::<$t>()).boxed()
            }
        }
    )*};
}

impl_element_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
    WideString, Null, Variant
);

impl<T: ElementConvertible + Convertible> ElementConvertible for Option<T> {
    fn convert_element(value: Variant) -> ConversionFuture<Self> {
        future::ready(value.convert_cast::<Option<T>>()).boxed()
    }
}

macro_rules! impl_element_container {
    ($($container:ty),*) => {$(
        impl<T: ElementConvertible> ElementConvertible for $container {
            fn convert_element(value: Variant) -> ConversionFuture<Self> {
                value.convert_cast_container::<Self>()
            }
        }
    )*};
}

impl_element_container!(Vec<T>, VecDeque<T>, BTreeMap<String, T>, HashMap<String, T>);
