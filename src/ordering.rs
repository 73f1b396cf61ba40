//! Less-than strategies bound to a variant when its payload is assigned.
//!
//! Each strategy receives the two erased payloads and is only ever called when
//! both sides hold the type the strategy was instantiated for.

use std::any::Any;
use std::sync::{Arc, Weak};

/// Signature of a bound ordering function.
pub(crate) type LessThan = fn(&dyn Any, &dyn Any) -> bool;

/// The relation a bound ordering implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    Unordered,
    Native,
    Identity,
}

/// An ordering function together with the relation it implements
///
/// For a given stored type the strategy determines the function, so two
/// payloads of one type are comparable exactly when their strategies match.
#[derive(Clone, Copy)]
pub(crate) struct BoundOrdering {
    strategy: Strategy,
    lessthan: LessThan,
}

impl BoundOrdering {
    pub(crate) fn unordered() -> Self {
        Self {
            strategy: Strategy::Unordered,
            lessthan: lessthan_default,
        }
    }

    pub(crate) fn native<T: PartialOrd + 'static>() -> Self {
        Self {
            strategy: Strategy::Native,
            lessthan: lessthan_native::<T>,
        }
    }

    pub(crate) fn weak<T: ?Sized + 'static>() -> Self {
        Self {
            strategy: Strategy::Identity,
            lessthan: lessthan_weak::<T>,
        }
    }

    pub(crate) fn shared<T: ?Sized + 'static>() -> Self {
        Self {
            strategy: Strategy::Identity,
            lessthan: lessthan_shared::<T>,
        }
    }

    /// Compares two payloads of the same type.
    ///
    /// Payloads bound to different strategies are never less than each other.
    pub(crate) fn less(&self, other: &Self, l: &dyn Any, r: &dyn Any) -> bool {
        self.strategy == other.strategy && (self.lessthan)(l, r)
    }
}

/// Ordering for payloads without a usable less-than relation.
pub(crate) fn lessthan_default(_: &dyn Any, _: &dyn Any) -> bool {
    false
}

/// Native `<` of the payload type.
pub(crate) fn lessthan_native<T: PartialOrd + 'static>(l: &dyn Any, r: &dyn Any) -> bool {
    match (l.downcast_ref::<T>(), r.downcast_ref::<T>()) {
        (Some(l), Some(r)) => l < r,
        _ => false,
    }
}

/// Owner-identity ordering for weak references.
pub(crate) fn lessthan_weak<T: ?Sized + 'static>(l: &dyn Any, r: &dyn Any) -> bool {
    match (l.downcast_ref::<Weak<T>>(), r.downcast_ref::<Weak<T>>()) {
        (Some(l), Some(r)) => l.as_ptr().cast::<()>() < r.as_ptr().cast::<()>(),
        _ => false,
    }
}

/// Owner-identity ordering for shared references.
pub(crate) fn lessthan_shared<T: ?Sized + 'static>(l: &dyn Any, r: &dyn Any) -> bool {
    match (l.downcast_ref::<Arc<T>>(), r.downcast_ref::<Arc<T>>()) {
        (Some(l), Some(r)) => Arc::as_ptr(l).cast::<()>() < Arc::as_ptr(r).cast::<()>(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_ordering() {
        assert!(lessthan_native::<i32>(&1, &2));
        assert!(!lessthan_native::<i32>(&2, &1));
        assert!(!lessthan_native::<f64>(&f64::NAN, &1.0));
    }

    #[test]
    fn test_mismatched_payloads_are_not_ordered() {
        assert!(!lessthan_native::<i32>(&1i32, &2i64));
    }

    #[test]
    fn test_weak_ordering_same_referent() {
        let shared = Arc::new(String::from("referent"));
        let a = Arc::downgrade(&shared);
        let b = Arc::downgrade(&shared);

        assert!(!lessthan_weak::<String>(&a, &b));
        assert!(!lessthan_weak::<String>(&b, &a));
    }

    #[test]
    fn test_weak_ordering_distinct_referents() {
        let first = Arc::new(1u32);
        let second = Arc::new(1u32);
        let a = Arc::downgrade(&first);
        let b = Arc::downgrade(&second);

        assert_ne!(lessthan_weak::<u32>(&a, &b), lessthan_weak::<u32>(&b, &a));
    }

    #[test]
    fn test_mixed_strategies_are_not_ordered() {
        let small = Arc::new(1u32);
        let big = Arc::new(2u32);
        let by_value = BoundOrdering::native::<Arc<u32>>();
        let by_owner = BoundOrdering::shared::<u32>();

        assert!(by_value.less(&by_value, &small, &big));
        assert!(!by_value.less(&by_owner, &small, &big));
        assert!(!by_owner.less(&by_value, &big, &small));
        assert!(!by_owner.less(&by_value, &small, &big));
    }
}
