use std::fmt;

/// UTF-16 text as handed over by wide-character callers
///
/// A `Variant` never stores a `WideString`. Wide input is transcoded to a UTF-8
/// `String` on entry, and transcoded back whenever a `WideString` is requested.
///
/// # Examples
///
/// ```
/// use sovran_variant::{Variant, WideString};
///
/// let wide = WideString::from("grüße 🌍");
/// let value = Variant::from(wide.clone());
///
/// assert!(value.is_of_type::<String>());
/// assert_eq!(value.cast::<String>()?, "grüße 🌍");
/// assert_eq!(value.cast::<WideString>()?, wide);
/// # Ok::<(), sovran_variant::CastError>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideString(Vec<u16>);

impl WideString {
    /// Wraps UTF-16 code units without validating them.
    pub fn new(units: Vec<u16>) -> Self {
        Self(units)
    }

    /// Copies UTF-16 code units out of a slice.
    pub fn from_units(units: &[u16]) -> Self {
        Self(units.to_vec())
    }

    /// The raw UTF-16 code units.
    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    /// Consumes the string, returning its code units.
    pub fn into_units(self) -> Vec<u16> {
        self.0
    }

    /// Length in UTF-16 code units, not characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no code units.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Transcodes to UTF-8, replacing unpaired surrogates with U+FFFD.
    pub fn to_utf8(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl From<&str> for WideString {
    fn from(value: &str) -> Self {
        Self(value.encode_utf16().collect())
    }
}

impl From<String> for WideString {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Vec<u16>> for WideString {
    fn from(units: Vec<u16>) -> Self {
        Self(units)
    }
}

impl fmt::Display for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_bmp() {
        let text = "Ωmega – 中文 – ﬀ";
        let wide = WideString::from(text);
        assert_eq!(wide.to_utf8(), text);
        assert_eq!(wide.len(), text.encode_utf16().count());
    }

    #[test]
    fn test_round_trip_supplementary_plane() {
        let text = "𝄞 🎉 𠜎";
        let wide = WideString::from(text);
        // each of these code points needs a surrogate pair
        assert_eq!(wide.len(), 8);
        assert_eq!(wide.to_utf8(), text);
    }

    #[test]
    fn test_unpaired_surrogate_is_replaced() {
        let wide = WideString::new(vec![0x0041, 0xD800, 0x0042]);
        assert_eq!(wide.to_utf8(), "A\u{FFFD}B");
    }
}
