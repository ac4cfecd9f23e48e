mod health;
mod links;
mod redirect;

pub use health::health_handler;
pub use links::{create_link_handler, resolve_link_handler};
pub use redirect::redirect_handler;
