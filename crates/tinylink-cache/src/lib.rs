//! `LinkCache` implementations for the tinylink shortener.

pub mod moka;
pub mod redis;

pub use self::moka::MokaLinkCache;
pub use self::redis::RedisLinkCache;
