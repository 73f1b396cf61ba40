/// Marker stored in a `Variant` that was explicitly set to null
///
/// Every `Null` is equal to every other `Null`, so two null variants never
/// order before one another.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Null;

/// Marker for a `Variant` that has never been assigned a value
///
/// A variant never actually stores an `Empty`; assigning one resets the
/// variant instead. `VariantType::empty()` is the identity of this type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Empty;
