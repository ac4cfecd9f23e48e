use jiff::Timestamp;
use thiserror::Error;

/// Errors returned by Flake initialization and ID generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("epoch is ahead of current clock time: epoch={epoch}, now={now}")]
    EpochAhead { epoch: Timestamp, now: Timestamp },
    #[error("39-bit tick space since the epoch is exhausted")]
    OverTimeLimit,
    #[error("generator state lock is poisoned")]
    StatePoisoned,
}
