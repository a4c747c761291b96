//! Raw-memory providers.
//!
//! The arena never allocates chunk storage itself; it draws blocks from a
//! [`ChunkSource`] supplied at construction and hands them back on rewind
//! and drop. Passing the provider as a capability object (rather than
//! fixing it process-wide) keeps the arena testable with fault-injecting
//! sources.

/// Provider of raw chunk storage for an arena.
///
/// Implementations supply zero-filled blocks on demand and take them back
/// when the arena releases a chunk. A source is owned by exactly one arena
/// and is only ever called from that arena's thread.
pub trait ChunkSource {
    /// Acquire a zero-filled block of exactly `len` bytes.
    ///
    /// Returns `None` when the source cannot satisfy the request; the
    /// arena surfaces this as `OutOfMemory` without retrying.
    fn acquire(&mut self, len: usize) -> Option<Vec<u8>>;

    /// Take back a block previously returned by [`acquire`](Self::acquire).
    ///
    /// The default implementation drops the block, returning it to the
    /// global allocator.
    fn release(&mut self, chunk: Vec<u8>) {
        drop(chunk);
    }
}

/// The default provider, backed by the global allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemSource;

impl ChunkSource for SystemSource {
    fn acquire(&mut self, len: usize) -> Option<Vec<u8>> {
        let mut block = Vec::new();
        block.try_reserve_exact(len).ok()?;
        block.resize(len, 0);
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_source_returns_zeroed_block() {
        let block = SystemSource.acquire(128).unwrap();
        assert_eq!(block.len(), 128);
        assert!(block.iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_len_block_is_valid() {
        let block = SystemSource.acquire(0).unwrap();
        assert!(block.is_empty());
    }
}
