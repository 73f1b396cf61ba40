//! Best-effort conversion of a stored value into a requested type.
//!
//! Conversions are tried in a fixed order: an exact type match returns the
//! stored value unchanged, then the destination type's [`Convertible`] impl
//! decides which stored types it accepts. Anything it does not accept is a
//! [`CastError`] naming both types.

use crate::error::CastError;
use crate::numeric::{render_text, Number, Numeric};
use crate::object::{ObjectRef, WeakObjectRef};
use crate::sentinel::{Empty, Null};
use crate::text::WideString;
use crate::variant::{Variant, VariantType};

/// A type a `Variant` can be converted into
///
/// Implement this for your own types to make them reachable through
/// [`Variant::convert_cast`]. The exact-type case is handled before
/// `convert_from` is called.
///
/// # Examples
///
/// ```
/// use sovran_variant::{CastError, Convertible, Variant};
///
/// #[derive(Debug, Clone, PartialEq, PartialOrd)]
/// struct Celsius(f64);
///
/// impl Convertible for Celsius {
///     fn convert_from(value: &Variant) -> Result<Self, CastError> {
///         value.convert_cast::<f64>().map(Celsius)
///     }
/// }
///
/// let reading = Variant::from("21.5");
/// assert_eq!(reading.convert_cast::<Celsius>()?, Celsius(21.5));
/// # Ok::<(), CastError>(())
/// ```
pub trait Convertible: Sized + Clone + 'static {
    /// Converts a value whose stored type is not `Self`.
    ///
    /// # Errors
    ///
    /// Returns a `CastError` when the stored type or value cannot be
    /// represented as `Self`.
    fn convert_from(value: &Variant) -> Result<Self, CastError>;
}

impl Variant {
    /// Converts the stored value to `T` if possible.
    ///
    /// Supported destinations include every primitive number type, `bool`,
    /// `String`, `WideString`, `Option<T>` and `Variant`. Containers are
    /// converted through [`Variant::convert_cast_container`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// assert_eq!(Variant::from("42").convert_cast::<u8>()?, 42);
    /// assert_eq!(Variant::from(3.99f64).convert_cast::<i32>()?, 3);
    /// assert!(Variant::from(300i32).convert_cast::<u8>().is_err());
    /// assert!(Variant::from("TRUE").convert_cast::<bool>()?);
    /// # Ok::<(), sovran_variant::CastError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `CastError` when the stored type has no conversion to `T`,
    /// when a number falls outside `T`'s range, or when text does not parse.
    pub fn convert_cast<T: Convertible>(&self) -> Result<T, CastError> {
        if let Ok(value) = self.cast_ref::<T>() {
            return Ok(value.clone());
        }
        T::convert_from(self).inspect_err(|err| {
            tracing::debug!(from = %err.from_type(), to = %err.to_type(), message = ?err.message(), "variant conversion failed");
        })
    }

    /// Returns true if the value is of type `T` or converts into it.
    pub fn can_be_type<T: Convertible>(&self) -> bool {
        self.is_of_type::<T>() || T::convert_from(self).is_ok()
    }
}

fn convert_numeric<T: Numeric>(value: &Variant) -> Result<T, CastError> {
    if let Ok(text) = value.cast_ref::<String>() {
        return T::parse_text(text).ok_or_else(|| {
            value
                .cast_error::<T>()
                .with_message(format!("`{}` is not a valid number of this type", text))
        });
    }
    match value.payload().and_then(Number::from_any) {
        Some(number) => T::from_number(number).ok_or_else(|| {
            value
                .cast_error::<T>()
                .with_message("value is out of range for the destination type")
        }),
        None => Err(value.cast_error::<T>()),
    }
}

macro_rules! impl_convertible_numeric {
    ($($t:ty),*) => {$(
        impl Convertible for $t {
            fn convert_from(value: &Variant) -> Result<Self, CastError> {
                convert_numeric::<$t>(value)
            }
        }
    )*};
}

impl_convertible_numeric!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl Convertible for bool {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        if let Ok(text) = value.cast_ref::<String>() {
            return match text.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(value
                    .cast_error::<bool>()
                    .with_message(format!("`{}` is not a boolean literal", text))),
            };
        }
        value
            .payload()
            .and_then(Number::from_any)
            .map(|number| !number.is_zero())
            .ok_or_else(|| value.cast_error::<bool>())
    }
}

impl Convertible for String {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        value
            .payload()
            .and_then(render_text)
            .ok_or_else(|| value.cast_error::<String>())
    }
}

impl Convertible for WideString {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        value
            .convert_cast::<String>()
            .map(WideString::from)
            .map_err(|_| value.cast_error::<WideString>())
    }
}

impl Convertible for Variant {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        Ok(value.clone())
    }
}

impl Convertible for Null {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        Err(value.cast_error::<Null>())
    }
}

impl Convertible for Empty {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        if value.is_empty() {
            Ok(Empty)
        } else {
            Err(value.cast_error::<Empty>())
        }
    }
}

impl Convertible for char {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        let text = value.cast_ref::<String>().map_err(|_| value.cast_error::<char>())?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(value
                .cast_error::<char>()
                .with_message("text must hold exactly one character")),
        }
    }
}

impl Convertible for ObjectRef {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        let weak = value
            .cast_ref::<WeakObjectRef>()
            .map_err(|_| value.cast_error::<ObjectRef>())?;
        weak.upgrade().ok_or_else(|| {
            value
                .cast_error::<ObjectRef>()
                .with_message("the referenced object has been released")
        })
    }
}

impl<T: Convertible> Convertible for Option<T> {
    fn convert_from(value: &Variant) -> Result<Self, CastError> {
        if value.is_null() || value.is_empty() {
            return Ok(None);
        }
        value
            .convert_cast::<T>()
            .map(Some)
            .map_err(|err| {
                let mapped = CastError::new(err.from_type(), VariantType::of::<Self>());
                match err.message() {
                    Some(message) => mapped.with_message(message),
                    None => mapped,
                }
            })
    }
}
