//! Checked numeric conversions between every primitive number type.
//!
//! Any stored number is first widened into a [`Number`], which holds every
//! primitive value exactly. Narrowing back into a destination type is range
//! checked against the destination's true mathematical range.

use std::any::Any;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Signed(i128),
    Unsigned(u128),
    Float(f64),
}

impl Number {
    /// Widens a stored payload. `bool` counts as the numbers 0 and 1.
    pub(crate) fn from_any(value: &dyn Any) -> Option<Number> {
        macro_rules! try_signed {
            ($($t:ty),*) => {$(
                if let Some(v) = value.downcast_ref::<$t>() {
                    return Some(Number::Signed(*v as i128));
                }
            )*};
        }
        macro_rules! try_unsigned {
            ($($t:ty),*) => {$(
                if let Some(v) = value.downcast_ref::<$t>() {
                    return Some(Number::Unsigned(*v as u128));
                }
            )*};
        }

        try_signed!(i8, i16, i32, i64, i128, isize);
        try_unsigned!(u8, u16, u32, u64, u128, usize);
        if let Some(v) = value.downcast_ref::<f64>() {
            return Some(Number::Float(*v));
        }
        if let Some(v) = value.downcast_ref::<f32>() {
            return Some(Number::Float(f64::from(*v)));
        }
        if let Some(v) = value.downcast_ref::<bool>() {
            return Some(Number::Unsigned(u128::from(*v)));
        }
        None
    }

    pub(crate) fn is_zero(self) -> bool {
        match self {
            Number::Signed(v) => v == 0,
            Number::Unsigned(v) => v == 0,
            Number::Float(v) => v == 0.0,
        }
    }
}

/// Truncates toward zero, yielding `None` for non-finite values and values
/// outside every integer type.
fn truncate_float(value: f64) -> Option<Number> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated < 0.0 {
        (truncated >= i128::MIN as f64).then(|| Number::Signed(truncated as i128))
    } else {
        (truncated < 2f64.powi(128)).then(|| Number::Unsigned(truncated as u128))
    }
}

/// Renders a stored number or boolean in its canonical textual form.
pub(crate) fn render_text(value: &dyn Any) -> Option<String> {
    macro_rules! try_render {
        ($($t:ty),*) => {$(
            if let Some(v) = value.downcast_ref::<$t>() {
                return Some(v.to_string());
            }
        )*};
    }

    try_render!(
        i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char
    );
    None
}

/// Destination side of a numeric conversion.
pub(crate) trait Numeric: Sized + Copy + FromStr + 'static {
    fn from_number(number: Number) -> Option<Self>;

    /// Strict parse of the whole string.
    fn parse_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {$(
        impl Numeric for $t {
            fn from_number(number: Number) -> Option<Self> {
                match number {
                    Number::Signed(v) => <$t>::try_from(v).ok(),
                    Number::Unsigned(v) => <$t>::try_from(v).ok(),
                    Number::Float(v) => truncate_float(v).and_then(Self::from_number),
                }
            }
        }
    )*};
}

impl_numeric_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Float parsing overflows to infinity instead of failing; only accept an
/// infinity that was spelled out.
fn spells_infinity(text: &str) -> bool {
    text.to_ascii_lowercase().contains("inf")
}

impl Numeric for f64 {
    fn from_number(number: Number) -> Option<Self> {
        match number {
            Number::Signed(v) => Some(v as f64),
            Number::Unsigned(v) => Some(v as f64),
            Number::Float(v) => Some(v),
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        let value: f64 = text.parse().ok()?;
        (!value.is_infinite() || spells_infinity(text)).then_some(value)
    }
}

impl Numeric for f32 {
    fn from_number(number: Number) -> Option<Self> {
        let value = match number {
            Number::Signed(v) => v as f32,
            Number::Unsigned(v) => v as f32,
            Number::Float(v) => {
                if v.is_finite() && v.abs() > f64::from(f32::MAX) {
                    return None;
                }
                return Some(v as f32);
            }
        };
        value.is_finite().then_some(value)
    }

    fn parse_text(text: &str) -> Option<Self> {
        let value: f32 = text.parse().ok()?;
        (!value.is_infinite() || spells_infinity(text)).then_some(value)
    }
}
