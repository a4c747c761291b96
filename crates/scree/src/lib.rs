//! Region-based bump allocation with mark/rewind reclamation.
//!
//! `scree` is an obstack-style arena: a single-owner byte pool with O(1)
//! bump allocation, incremental construction of objects whose final size is
//! unknown until finished, and bulk reclamation of any suffix of the
//! allocation history in one operation.
//!
//! # Architecture
//!
//! ```text
//! Arena (orchestrator)
//! ├── Chunk list (SmallVec, tail = chunk being filled)
//! │   └── Chunk (Vec<u8> + bump cursor, tagged with a unique ChunkId)
//! ├── ChunkSource (raw-memory provider, a constructor capability)
//! └── Mark / AllocHandle (ChunkId-tagged position tokens)
//! ```
//!
//! Objects never span chunks: a request that does not fit in the tail chunk
//! goes entirely into a new chunk sized to hold it, and an object under
//! incremental construction migrates whole before it would overflow.
//!
//! Deallocation is region-scoped, not per-object. A [`Mark`] captures the
//! cursor; [`Arena::rewind`] frees every byte allocated since, releasing
//! whole trailing chunks back to the source. There is no way to free an
//! individual object other than the most recently allocated suffix.
//!
//! # Staleness
//!
//! Marks and handles carry the unique ID of the chunk they point into.
//! Rewinding to a mark whose chunk has been released — by an earlier
//! rewind, or because the mark belongs to a different arena — fails with
//! an error instead of resolving into freed memory. One case is not
//! detectable: a position rewound away and then re-covered by new
//! allocations resolves to the new contents.
//!
//! # Example
//!
//! ```
//! use scree::{Arena, ArenaConfig};
//!
//! let mut arena = Arena::new(ArenaConfig::default())?;
//! let scope = arena.mark();
//!
//! let greeting = arena.alloc_slice(b"hello")?;
//! arena.begin()?;
//! arena.append(b"wor")?;
//! arena.append(b"ld")?;
//! let built = arena.finish()?;
//!
//! assert_eq!(arena.get(&greeting)?, b"hello");
//! assert_eq!(arena.get(&built)?, b"world");
//!
//! arena.rewind(scope)?;
//! assert_eq!(arena.mark(), scope);
//! # Ok::<(), scree::ArenaError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod arena;
pub mod chunk;
pub mod config;
pub mod error;
pub mod mark;
pub mod source;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use mark::{AllocHandle, ChunkId, Mark};
pub use source::{ChunkSource, SystemSource};
