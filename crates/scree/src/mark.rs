//! Marks and allocation handles.
//!
//! A [`Mark`] is a captured cursor position usable as a rewind target; an
//! [`AllocHandle`] is the stable address of a finished allocation. Both are
//! tagged with the [`ChunkId`] of the chunk they point into, which lets the
//! arena check at runtime that the token still names live memory instead of
//! silently resolving into a released chunk.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ChunkId`] allocation.
static CHUNK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one arena chunk.
///
/// Allocated from a monotonic atomic counter via [`ChunkId::next`], so two
/// distinct chunks always carry different IDs — even chunks of different
/// arenas, and even a chunk allocated at the same address as one that was
/// just released. This is what makes stale and foreign marks detectable:
/// a released chunk's ID never reappears in any live chunk list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(u64);

impl ChunkId {
    /// Allocate a fresh, unique chunk ID.
    pub(crate) fn next() -> Self {
        Self(CHUNK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A captured cursor position: the rewind target for a region scope.
///
/// Obtained from [`Arena::mark`](crate::Arena::mark) or from a zero-length
/// allocation via [`AllocHandle::mark`]. Passing a mark back to
/// [`Arena::rewind`](crate::Arena::rewind) frees every byte allocated at or
/// after it in one operation.
///
/// A mark stays valid until a rewind to a position at or before it. The
/// arena rejects marks whose chunk has been released (including marks from
/// a different arena) with `StaleMark`; a mark whose position has been
/// rewound away but later re-covered by new allocations is not detectable
/// and resolves to the new contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Mark {
    /// Identity of the chunk the cursor was in when captured.
    pub(crate) chunk: ChunkId,
    /// Byte offset of the cursor within that chunk.
    pub(crate) offset: usize,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mark(chunk={}, off={})", self.chunk, self.offset)
    }
}

/// Stable address of a finished allocation within an arena.
///
/// Handles are issued by [`Arena::alloc`](crate::Arena::alloc),
/// [`Arena::alloc_slice`](crate::Arena::alloc_slice), and
/// [`Arena::finish`](crate::Arena::finish), and resolved back to bytes via
/// [`Arena::get`](crate::Arena::get) / [`Arena::get_mut`](crate::Arena::get_mut).
/// The arena does not store per-object sizes; the handle is the caller's
/// record of where the object lives and how long it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct AllocHandle {
    /// Identity of the chunk holding the allocation.
    pub(crate) chunk: ChunkId,
    /// Byte offset of the allocation within that chunk.
    pub(crate) offset: usize,
    /// Length of the allocation in bytes.
    pub(crate) len: usize,
}

impl AllocHandle {
    /// Create a new handle.
    pub(crate) fn new(chunk: ChunkId, offset: usize, len: usize) -> Self {
        Self { chunk, offset, len }
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The position of this allocation's first byte, as a rewind target.
    ///
    /// Rewinding to this mark frees the object itself and everything
    /// allocated after it.
    pub fn mark(&self) -> Mark {
        Mark {
            chunk: self.chunk,
            offset: self.offset,
        }
    }
}

impl fmt::Display for AllocHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AllocHandle(chunk={}, off={}, len={})",
            self.chunk, self.offset, self.len
        )
    }
}
