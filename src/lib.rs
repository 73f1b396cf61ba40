//! # sovran-variant
//!
//! A type-erased value container with checked casts and best-effort conversions.
//!
//! `sovran-variant` provides [`Variant`], a single slot that can hold a value of
//! any type. Code that receives a variant can ask what it holds, read it back as
//! exactly that type, or convert it into the type it actually needs. This is the
//! shape of data that crosses the boundary between native code and a
//! dynamically-typed caller.
//!
//! ## Key Features
//!
//! - **Type-safe**: Exact casts are checked at runtime and never promote or truncate
//! - **Conversions**: Numbers, text, wide text, booleans and containers convert
//!   with strict range and parse checks
//! - **Ordering**: Variants compare with the ordering of their stored type
//! - **Async containers**: Structured objects are read through an async trait,
//!   so remote objects never block the caller
//! - **One error type**: Every failure is a [`CastError`] naming both types
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_variant::{CastError, Variant};
//!
//! fn main() -> Result<(), CastError> {
//!     // Store values of different types
//!     let number = Variant::from(42i32);
//!     let text = Variant::from("Hello, world!");
//!     let list = Variant::new(vec![1, 2, 3, 4, 5]);
//!
//!     // Retrieve values in a type-safe way
//!     let num = number.cast::<i32>()?;
//!     let greeting = text.cast::<String>()?;
//!     let len = list.with(|numbers: &Vec<i32>| numbers.len())?;
//!
//!     println!("Number: {}", num);
//!     println!("Text: {}", greeting);
//!     println!("Length: {}", len);
//!
//!     // Handle errors properly
//!     match number.cast::<bool>() {
//!         Ok(value) => println!("Value: {}", value),
//!         Err(e) => println!("Stored {} but asked for {}", e.from_type(), e.to_type()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Converting Values
//!
//! ```rust
//! use sovran_variant::{CastError, Variant, WideString};
//!
//! fn main() -> Result<(), CastError> {
//!     let port = Variant::from("8080");
//!     assert_eq!(port.convert_cast::<u16>()?, 8080);
//!
//!     // Out of range values fail instead of wrapping
//!     assert!(Variant::from(70_000i64).convert_cast::<u16>().is_err());
//!
//!     // Floats truncate toward zero
//!     assert_eq!(Variant::from(-7.9f64).convert_cast::<i8>()?, -7);
//!
//!     // Booleans accept numbers and literals
//!     assert!(Variant::from("True").convert_cast::<bool>()?);
//!     assert!(!Variant::from(0u8).convert_cast::<bool>()?);
//!
//!     // Wide text is stored as UTF-8 and handed back as UTF-16
//!     let name = Variant::from(WideString::from("Zoë"));
//!     assert_eq!(name.cast::<String>()?, "Zoë");
//!     assert_eq!(name.convert_cast::<WideString>()?, WideString::from("Zoë"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Converting External Objects
//!
//! ```rust
//! use async_trait::async_trait;
//! use sovran_variant::{ExternalObject, ObjectRef, Variant};
//! use std::sync::Arc;
//!
//! struct JsArray(Vec<Variant>);
//!
//! #[async_trait]
//! impl ExternalObject for JsArray {
//!     async fn length(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     async fn element(&self, index: usize) -> Variant {
//!         self.0.get(index).cloned().unwrap_or_default()
//!     }
//!
//!     async fn keys(&self) -> Vec<String> {
//!         (0..self.0.len()).map(|i| i.to_string()).collect()
//!     }
//!
//!     async fn property(&self, key: &str) -> Variant {
//!         key.parse::<usize>()
//!             .ok()
//!             .and_then(|i| self.0.get(i).cloned())
//!             .unwrap_or_default()
//!     }
//! }
//!
//! let array: ObjectRef = Arc::new(JsArray(vec![
//!     Variant::from("1"),
//!     Variant::from("2"),
//!     Variant::from("3"),
//! ]));
//! let value = Variant::from(array);
//!
//! let pending = value.convert_cast_container::<Vec<i32>>();
//! let numbers = futures_util::FutureExt::now_or_never(pending);
//! assert_eq!(numbers, Some(Ok(vec![1, 2, 3])));
//! ```
//!
//! ### Ordering
//!
//! ```rust
//! use sovran_variant::Variant;
//! use std::sync::Arc;
//!
//! assert!(Variant::from(1u32).less_than(&Variant::from(2u32)));
//!
//! // Weak references compare by the allocation they point at
//! let shared = Arc::new(String::from("owner"));
//! let a = Variant::from_weak(Arc::downgrade(&shared));
//! let b = Variant::from_weak(Arc::downgrade(&shared));
//! assert!(!a.less_than(&b) && !b.less_than(&a));
//! ```

mod any_value;
mod container;
mod convert;
mod error;
mod numeric;
mod object;
mod ordering;
mod sentinel;
mod text;
mod variant;


pub use container::{ContainerConvertible, ConversionFuture, ElementConvertible, StructuredSource};
pub use convert::Convertible;
pub use error::CastError;
pub use object::{ExternalObject, ObjectRef, WeakObjectRef};
pub use sentinel::{Empty, Null};
pub use text::WideString;
pub use variant::{make_variant, Variant, VariantType};

#[cfg(feature = "test-support")]
pub use object::MockExternalObject;

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};
