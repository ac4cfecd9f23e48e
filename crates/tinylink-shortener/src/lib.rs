//! Shortener service implementation.
//!
//! Wires an ID generator, a link store and a link cache into the core
//! `Shortener` contract: bounded collision retries on the write path, a
//! cache-aside protocol on the read path.

pub mod service;

pub use service::{ShortenerService, CACHE_TTL, MAX_ATTEMPTS};
