#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

//! Attributes that are computed on first read and cached on the instance.
//!
//! The owning type declares a [`Slot`] field per attribute and an associated
//! constant holding a [`LazyAttribute`] (read-only) or a
//! [`LazyWritableAttribute`] (accepts writes that overwrite the cache). The
//! constant is the class level handle: it can be inspected without an
//! instance, and every read through it consults the slot of the instance
//! passed in.
//!
//! ```
//! use lazy_attr::{computation, LazyWritableAttribute, Slot};
//!
//! #[derive(Default)]
//! struct Request {
//!     body: String,
//!     words: Slot<usize>,
//! }
//!
//! impl Request {
//!     const WORDS: LazyWritableAttribute<Self, usize> = LazyWritableAttribute::new(
//!         computation! {
//!             /// Number of whitespace separated words in the body.
//!             infallible fn words(req: &Request) -> usize {
//!                 req.body.split_whitespace().count()
//!             }
//!         },
//!         |r| &r.words,
//!         |r| &mut r.words,
//!     );
//! }
//!
//! let mut req = Request { body: "a b c".into(), ..Default::default() };
//! assert_eq!(Request::WORDS.get(&req), Ok(&3));
//!
//! Request::WORDS.set(&mut req, 10).unwrap();
//! assert_eq!(Request::WORDS.get(&req), Ok(&10));
//! ```

pub use attribute::{Access, Attribute, LazyAttribute};
pub use computation::Computation;
pub use err::AttributeError;
pub use slot::{CacheSlot, Slot, SyncSlot};
pub use writable::LazyWritableAttribute;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod attribute;
pub mod computation;
pub mod err;
pub mod slot;
pub mod writable;
mod logging;
