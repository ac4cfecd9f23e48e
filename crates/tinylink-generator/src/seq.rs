use crate::IdGenerator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinylink_core::IdError;

/// A deterministic sequential ID generator.
///
/// Produces 0, 1, 2, ... — unique within a single instance and entirely
/// predictable, which is exactly what service tests want.
#[derive(Debug, Default)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the sequence at `first` instead of zero.
    pub fn starting_at(first: u64) -> Self {
        Self {
            counter: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SeqGenerator {
    fn next_id(&self) -> Result<u64, IdError> {
        Ok(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}
