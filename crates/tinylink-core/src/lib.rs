//! Core types and contracts for the tinylink URL shortener.
//!
//! This crate provides the shared domain types, the collaborator contracts
//! (link store, link cache, shortener) and the error taxonomy used by the
//! service and its backends.

pub mod base62;
pub mod cache;
pub mod error;
pub mod shortcode;
pub mod shortener;
pub mod store;
pub mod validate;

pub use cache::LinkCache;
pub use error::{CacheError, CoreError, IdError, ShortenerError, StoreError};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
pub use store::{Link, LinkStore};
pub use validate::is_valid_url;
