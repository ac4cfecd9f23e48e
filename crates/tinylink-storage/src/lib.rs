//! `LinkStore` implementations for the tinylink shortener.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryLinkStore;
pub use postgres::PostgresLinkStore;
