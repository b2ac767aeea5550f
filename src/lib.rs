//! Bookstore application library
//!
//! Houses the `authors` and `books` modules along with the request
//! validation and wire-to-storage conversions they share.

pub mod context;
pub mod convert;
pub mod modules;
pub mod validate;

pub use context::ApiContext;
