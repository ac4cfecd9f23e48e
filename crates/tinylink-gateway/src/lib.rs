//! HTTP transport for the tinylink shortener.
//!
//! Maps the core operations onto a small JSON API plus the redirect
//! endpoint that short links themselves point at.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
