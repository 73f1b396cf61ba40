use crate::any_value::AnyValue;
use crate::error::CastError;
use crate::ordering::BoundOrdering;
use crate::sentinel::{Empty, Null};
use crate::text::WideString;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

/// Run-time identity of the type stored in a `Variant`
///
/// Two identities are equal exactly when they name the same Rust type. The
/// type name is carried along for error messages and logging.
#[derive(Clone, Copy)]
pub struct VariantType {
    id: TypeId,
    name: &'static str,
}

impl VariantType {
    /// The identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The identity reported by a variant that holds no value.
    pub fn empty() -> Self {
        Self::of::<Empty>()
    }

    /// The underlying `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this is the identity of `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for VariantType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for VariantType {}

impl Hash for VariantType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VariantType({})", self.name)
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value of any type, retrievable by exact type or convertible to another
///
/// A `Variant` owns exactly one payload at a time, or nothing at all. Copies
/// are deep: cloning a variant clones its payload. Along with the payload the
/// variant keeps the less-than function of the payload's type, which is
/// replaced together with the payload on every assignment.
///
/// # Examples
///
/// ```
/// use sovran_variant::{CastError, Variant};
///
/// let mut value = Variant::from(5i32);
/// assert!(value.is_of_type::<i32>());
/// assert_eq!(value.cast::<i32>()?, 5);
///
/// // Exact casts never promote
/// assert!(value.cast::<i64>().is_err());
///
/// // Conversions do
/// assert_eq!(value.convert_cast::<i64>()?, 5);
/// assert_eq!(value.convert_cast::<String>()?, "5");
///
/// value.reset();
/// assert!(value.is_empty());
/// # Ok::<(), CastError>(())
/// ```
#[derive(Clone)]
pub struct Variant {
    object: Option<AnyValue>,
    ordering: BoundOrdering,
}

impl Variant {
    /// Creates a variant holding no value.
    pub fn new_empty() -> Self {
        Self {
            object: None,
            ordering: BoundOrdering::unordered(),
        }
    }

    /// Creates a variant holding `value`, ordered by the type's `<`.
    ///
    /// A `&'static str` is stored as a `String`, a `WideString` is transcoded
    /// and stored as a `String`, and the `Empty` marker leaves the variant
    /// empty.
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + PartialOrd + Send + Sync + 'static,
    {
        let mut variant = Self::new_empty();
        variant.assign(value);
        variant
    }

    /// Creates a variant holding a value whose type has no ordering.
    ///
    /// Such variants never compare less than one another.
    pub fn new_unordered<T>(value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut variant = Self::new_empty();
        variant.assign_unordered(value);
        variant
    }

    /// Creates a variant holding a copy of `text` as a `String`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.to_owned())
    }

    /// Creates a variant from UTF-16 text, stored as UTF-8.
    ///
    /// Unpaired surrogates are replaced with U+FFFD.
    pub fn from_wide_text(units: &[u16]) -> Self {
        Self::new(String::from_utf16_lossy(units))
    }

    /// Creates a variant holding a weak reference, ordered by the identity of
    /// the referenced allocation rather than its value.
    pub fn from_weak<T>(value: Weak<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut variant = Self::new_empty();
        variant.store(value, BoundOrdering::weak::<T>());
        variant
    }

    /// Creates a variant holding a shared reference, ordered by the identity
    /// of the referenced allocation rather than its value.
    pub fn from_shared<T>(value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut variant = Self::new_empty();
        variant.store(value, BoundOrdering::shared::<T>());
        variant
    }

    /// Replaces the stored value, rebinding the ordering to `T`'s `<`.
    pub fn assign<T>(&mut self, value: T) -> &mut Self
    where
        T: Clone + PartialOrd + Send + Sync + 'static,
    {
        let any: &dyn Any = &value;
        if let Some(text) = any.downcast_ref::<&'static str>() {
            let text = (*text).to_owned();
            self.store(text, BoundOrdering::native::<String>());
        } else if let Some(wide) = any.downcast_ref::<WideString>() {
            let text = wide.to_utf8();
            self.store(text, BoundOrdering::native::<String>());
        } else if any.is::<Empty>() {
            self.reset();
        } else {
            self.store(value, BoundOrdering::native::<T>());
        }
        self
    }

    /// Replaces the stored value with one whose type has no ordering.
    pub fn assign_unordered<T>(&mut self, value: T) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.store(value, BoundOrdering::unordered());
        self
    }

    /// Replaces the stored value with a copy of another variant's value.
    pub fn assign_variant(&mut self, other: &Variant) -> &mut Self {
        self.object = other.object.clone();
        self.ordering = other.ordering;
        self
    }

    fn store<T>(&mut self, value: T, ordering: BoundOrdering)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.object = Some(AnyValue::new(value));
        self.ordering = ordering;
    }

    /// Exchanges values, and their orderings, with another variant.
    pub fn swap(&mut self, other: &mut Variant) -> &mut Self {
        std::mem::swap(self, other);
        self
    }

    /// Drops the stored value and returns to the empty state.
    pub fn reset(&mut self) {
        self.object = None;
        self.ordering = BoundOrdering::unordered();
    }

    /// Returns true if no value has been assigned, or the variant was reset.
    pub fn is_empty(&self) -> bool {
        self.object.is_none()
    }

    /// Returns true if the variant holds the `Null` marker.
    pub fn is_null(&self) -> bool {
        self.is_of_type::<Null>()
    }

    /// Gets the identity of the stored type, or `VariantType::empty()`.
    pub fn get_type(&self) -> VariantType {
        match &self.object {
            Some(object) => VariantType {
                id: object.type_id,
                name: object.type_name,
            },
            None => VariantType::empty(),
        }
    }

    /// Query whether the stored value is exactly of type `T`.
    ///
    /// Text is stored as `String`, so asking for `WideString` is answered for
    /// the stored `String`.
    pub fn is_of_type<T: 'static>(&self) -> bool {
        match &self.object {
            Some(object) => {
                object.is_type::<T>()
                    || (TypeId::of::<T>() == TypeId::of::<WideString>()
                        && object.is_type::<String>())
            }
            None => TypeId::of::<T>() == TypeId::of::<Empty>(),
        }
    }

    /// Returns a copy of the stored value if it is exactly of type `T`.
    ///
    /// # Errors
    ///
    /// Returns a `CastError` naming the stored and requested types when they
    /// differ. No numeric promotion takes place.
    pub fn cast<T: Clone + 'static>(&self) -> Result<T, CastError> {
        if TypeId::of::<T>() == TypeId::of::<WideString>() {
            let text = self
                .cast_ref::<String>()
                .map_err(|_| self.cast_error::<T>())?;
            let wide: Box<dyn Any> = Box::new(WideString::from(text.as_str()));
            return wide
                .downcast::<T>()
                .map(|wide| *wide)
                .map_err(|_| self.cast_error::<T>());
        }
        self.cast_ref::<T>().cloned()
    }

    /// Borrows the stored value if it is exactly of type `T`.
    ///
    /// # Errors
    ///
    /// Returns a `CastError` when the stored type is not `T`.
    pub fn cast_ref<T: 'static>(&self) -> Result<&T, CastError> {
        self.object
            .as_ref()
            .and_then(|object| object.downcast_ref::<T>())
            .ok_or_else(|| self.cast_error::<T>())
    }

    /// Runs a closure with read access to the stored value.
    ///
    /// This avoids cloning payloads that are expensive to copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// let value = Variant::new(vec![1, 2, 3]);
    /// let len = value.with(|numbers: &Vec<i32>| numbers.len())?;
    /// assert_eq!(len, 3);
    /// # Ok::<(), sovran_variant::CastError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `CastError` when the stored type is not `T`.
    pub fn with<T: 'static, F, R>(&self, f: F) -> Result<R, CastError>
    where
        F: FnOnce(&T) -> R,
    {
        self.cast_ref::<T>().map(f)
    }

    /// Orders two variants.
    ///
    /// Variants of the same type use the ordering bound at assignment, so
    /// weak references compare by owner identity and unordered types never
    /// compare less. Two values of one type bound to different orderings (an
    /// `Arc` from `new` against one from `from_shared`) are unordered.
    /// Variants of different types order by type name, then by `TypeId`.
    pub fn less_than(&self, other: &Variant) -> bool {
        match (&self.object, &other.object) {
            (Some(l), Some(r)) if l.type_id == r.type_id => {
                self.ordering.less(&other.ordering, l.as_any(), r.as_any())
            }
            (None, None) => false,
            _ => {
                let (l, r) = (self.get_type(), other.get_type());
                (l.name(), l.id()) < (r.name(), r.id())
            }
        }
    }

    pub(crate) fn payload(&self) -> Option<&dyn Any> {
        self.object.as_ref().map(AnyValue::as_any)
    }

    pub(crate) fn cast_error<T: ?Sized + 'static>(&self) -> CastError {
        CastError::new(self.get_type(), VariantType::of::<T>())
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::numeric::render_text(self.payload().unwrap_or(&Empty)) {
            Some(text) => write!(f, "Variant({}: {})", self.get_type(), text),
            None => match self.cast_ref::<String>() {
                Ok(text) => write!(f, "Variant({:?})", text),
                Err(_) => write!(f, "Variant({})", self.get_type()),
            },
        }
    }
}

/// Creates a variant holding `value`.
pub fn make_variant<T>(value: T) -> Variant
where
    T: Clone + PartialOrd + Send + Sync + 'static,
{
    Variant::new(value)
}

macro_rules! impl_from_ordered {
    ($($t:ty),*) => {$(
        impl From<$t> for Variant {
            fn from(value: $t) -> Self {
                Variant::new(value)
            }
        }
    )*};
}

impl_from_ordered!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
    Null, Empty, WideString
);

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::from_text(value)
    }
}

impl From<&String> for Variant {
    fn from(value: &String) -> Self {
        Variant::from_text(value)
    }
}

impl<T> From<Option<T>> for Variant
where
    Variant: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Variant::from(value),
            None => Variant::new(Null),
        }
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(value: Vec<Variant>) -> Self {
        Variant::new_unordered(value)
    }
}

impl From<std::collections::BTreeMap<String, Variant>> for Variant {
    fn from(value: std::collections::BTreeMap<String, Variant>) -> Self {
        Variant::new_unordered(value)
    }
}
