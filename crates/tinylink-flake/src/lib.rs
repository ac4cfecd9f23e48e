mod clock;
pub mod error;
mod flake;
mod flake_id;

pub use clock::{Clock, SystemClock};
pub use error::Error;
pub use flake::{Flake, FlakeSettings};
pub use flake_id::FlakeId;
