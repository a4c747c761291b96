//! Owned byte chunks with bump allocation.
//!
//! A [`Chunk`] is one contiguously-allocated `Vec<u8>` with a cursor that
//! advances on each allocation and can be truncated back on rewind. Chunks
//! are the fundamental storage unit of the arena; an object always lives
//! entirely within one chunk.

use crate::mark::ChunkId;

/// A single contiguous byte block with bump allocation.
///
/// Bytes `[0, cursor)` are allocated; `[cursor, capacity)` are free. The
/// backing block is acquired from a [`ChunkSource`](crate::ChunkSource) at
/// creation and handed back whole when the chunk is released.
pub struct Chunk {
    /// Unique identity, never reused across chunks.
    id: ChunkId,
    /// Backing storage. Allocated to full capacity at creation.
    data: Vec<u8>,
    /// Bump pointer: offset of the next free byte.
    cursor: usize,
}

impl Chunk {
    /// Wrap a source-provided block as a fresh, empty chunk.
    pub(crate) fn new(id: ChunkId, data: Vec<u8>) -> Self {
        Self {
            id,
            data,
            cursor: 0,
        }
    }

    /// This chunk's unique identity.
    pub fn id(&self) -> ChunkId {
        self.id
    }

    /// Bump-allocate `len` bytes from this chunk.
    ///
    /// Returns the starting offset of the allocation, or `None` if the
    /// remaining capacity is insufficient. The region is zero-filled: after
    /// a rewind it may hold bytes from reclaimed objects.
    pub fn alloc(&mut self, len: usize) -> Option<usize> {
        let new_cursor = self.cursor.checked_add(len)?;
        if new_cursor > self.data.len() {
            return None;
        }
        let offset = self.cursor;
        self.cursor = new_cursor;
        self.data[offset..new_cursor].fill(0);
        Some(offset)
    }

    /// Rewind the cursor to `offset`, freeing every byte at or after it.
    ///
    /// # Panics
    ///
    /// Panics if `offset` exceeds the current cursor.
    pub fn truncate(&mut self, offset: usize) {
        assert!(
            offset <= self.cursor,
            "truncate past cursor: {} > {}",
            offset,
            self.cursor
        );
        self.cursor = offset;
    }

    /// Shared view of the allocated range `[offset, offset + len)`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the chunk's capacity.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Mutable view of the allocated range `[offset, offset + len)`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the chunk's capacity.
    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }

    /// Number of bytes currently allocated.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Remaining free capacity in bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Unwrap the backing block for release back to the source.
    pub(crate) fn into_data(self) -> Vec<u8> {
        self.data
    }
}
