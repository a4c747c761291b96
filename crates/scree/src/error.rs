//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::mark::ChunkId;

/// Errors that can occur during arena operations.
///
/// All errors are reported synchronously at the call that triggered them;
/// nothing is retried internally, and no operation partially succeeds. An
/// `OutOfMemory` failure leaves the arena usable — the caller may retry
/// with a smaller request or abandon the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The chunk source refused to supply a block of the requested size.
    OutOfMemory {
        /// Number of bytes requested from the source.
        requested: usize,
    },
    /// An operation that requires no open object build found one
    /// (a second `begin`, or `alloc`/`rewind` mid-build).
    BuildOpen,
    /// An operation that requires an open object build found none
    /// (`append`, `finish`, or `discard` without a preceding `begin`).
    NoBuild,
    /// A `Mark` whose chunk is not live in this arena: it was released by
    /// an earlier rewind, or the mark came from a different arena.
    StaleMark {
        /// The chunk identity encoded in the mark.
        chunk: ChunkId,
    },
    /// An `AllocHandle` whose chunk is not live in this arena, or whose
    /// byte range lies beyond the live region after a rewind.
    StaleHandle {
        /// The chunk identity encoded in the handle.
        chunk: ChunkId,
    },
    /// Construction-time configuration validation failed.
    InvalidConfig {
        /// Human-readable description of the invalid parameter.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "chunk source exhausted: requested {requested} bytes")
            }
            Self::BuildOpen => write!(f, "an object build is already open"),
            Self::NoBuild => write!(f, "no object build is open"),
            Self::StaleMark { chunk } => {
                write!(f, "stale mark: chunk {chunk} is not live in this arena")
            }
            Self::StaleHandle { chunk } => {
                write!(f, "stale handle: chunk {chunk} is not live in this arena")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
