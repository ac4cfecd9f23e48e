//! ID generation for the tinylink shortener.
//!
//! The flake generator is the production source of IDs; [`seq`] provides
//! the deterministic counter generator used by service tests.

pub mod seq;

use tinylink_core::IdError;
use tinylink_flake::{Clock, Error as FlakeError, Flake};

/// Source of globally unique 64-bit IDs.
///
/// Implementations are pure generators that don't interact with storage:
/// uniqueness across concurrently running service instances must come from
/// the structure of the IDs themselves (time, sequence, a per-instance
/// identifier), never from coordination over the network.
pub trait IdGenerator: Send + Sync + 'static {
    /// Produces the next unique ID.
    ///
    /// Fails only when the generator's budget is exhausted or its state is
    /// unusable; callers treat every failure as non-retryable.
    fn next_id(&self) -> Result<u64, IdError>;
}

// Forwarding impl so shared handles can be injected directly.
impl<T: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<T> {
    fn next_id(&self) -> Result<u64, IdError> {
        (**self).next_id()
    }
}

impl<C: Clock + 'static> IdGenerator for Flake<C> {
    fn next_id(&self) -> Result<u64, IdError> {
        match Flake::next_id(self) {
            Ok(id) => Ok(id.as_u64()),
            Err(err @ FlakeError::OverTimeLimit) => Err(IdError::Exhausted(err.to_string())),
            Err(err) => Err(IdError::Generator(err.to_string())),
        }
    }
}
