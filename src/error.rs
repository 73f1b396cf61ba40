use crate::variant::VariantType;
use thiserror::Error;

/// Errors that can occur when reading a value back out of a `Variant`
///
/// There is exactly one failure kind. It records the type that was stored and
/// the type that was requested, and optionally a short explanation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot cast `{}` to `{}`{}", .from.name(), .to.name(), suffix(.message))]
pub struct CastError {
    from: VariantType,
    to: VariantType,
    message: Option<String>,
}

impl CastError {
    /// Creates an error for a failed cast from `from` to `to`.
    pub fn new(from: VariantType, to: VariantType) -> Self {
        Self {
            from,
            to,
            message: None,
        }
    }

    /// Attaches a human-readable explanation to the error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The type that was stored in the variant.
    pub fn from_type(&self) -> VariantType {
        self.from
    }

    /// The type that was requested.
    pub fn to_type(&self) -> VariantType {
        self.to
    }

    /// The explanation attached with `with_message`, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

fn suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_message() {
        let err = CastError::new(VariantType::of::<i32>(), VariantType::of::<String>());
        assert_eq!(err.to_string(), "cannot cast `i32` to `alloc::string::String`");
        assert_eq!(err.message(), None);
    }

    #[test]
    fn test_display_with_message() {
        let err = CastError::new(VariantType::of::<String>(), VariantType::of::<u8>())
            .with_message("out of range");
        assert!(err.to_string().ends_with(": out of range"));
        assert_eq!(err.from_type(), VariantType::of::<String>());
        assert_eq!(err.to_type(), VariantType::of::<u8>());
    }
}
