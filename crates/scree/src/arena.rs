//! The arena orchestrator: allocation, incremental builds, and rewind.
//!
//! [`Arena`] owns an ordered list of [`Chunk`]s whose tail is the chunk
//! currently being filled. The lifecycle of a region scope is:
//!
//! 1. `mark()` — capture the cursor as a rewind target
//! 2. `alloc()` / `alloc_slice()` — bump-allocate objects, or
//!    `begin()` / `append()` / `finish()` — grow an object of unknown size
//! 3. `rewind(mark)` — free every byte allocated since the mark, releasing
//!    whole trailing chunks back to the source
//!
//! Allocation never crosses a chunk boundary: a request that does not fit
//! in the tail chunk goes entirely into a new chunk, and an object under
//! incremental construction migrates whole into the new chunk.

use smallvec::SmallVec;

use crate::chunk::Chunk;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::mark::{AllocHandle, ChunkId, Mark};
use crate::source::{ChunkSource, SystemSource};

/// A region-based bump allocator with mark/rewind reclamation.
///
/// The arena exclusively owns all chunk memory. Allocations are addressed
/// by copyable [`AllocHandle`] tokens and resolved to byte slices through
/// [`Arena::get`] / [`Arena::get_mut`]; because `rewind` takes `&mut self`,
/// no resolved slice can outlive a rewind that would invalidate it.
///
/// Single-owner and single-threaded by design: no operation blocks, and
/// every operation is a bounded number of comparisons, at most one source
/// call, and a bounded copy.
pub struct Arena<S: ChunkSource = SystemSource> {
    /// Ordered chunk list; the tail is the chunk being filled. Inline
    /// storage covers the common case of an arena that never exceeds a
    /// few chunks.
    chunks: SmallVec<[Chunk; 4]>,
    /// Offset of the open object's first byte in the tail chunk, while an
    /// incremental build is in progress.
    building: Option<usize>,
    /// Raw-memory provider.
    source: S,
    config: ArenaConfig,
}

impl Arena<SystemSource> {
    /// Create an arena backed by the global allocator.
    ///
    /// Fails with `InvalidConfig` if `config.chunk_size` is below
    /// [`ArenaConfig::MIN_CHUNK_SIZE`], or `OutOfMemory` if the initial
    /// chunk cannot be acquired. These are the only construction failures.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        Self::with_source(config, SystemSource)
    }
}

impl<S: ChunkSource> Arena<S> {
    /// Create an arena drawing chunk storage from `source`.
    pub fn with_source(config: ArenaConfig, mut source: S) -> Result<Self, ArenaError> {
        if config.chunk_size < ArenaConfig::MIN_CHUNK_SIZE {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "chunk_size must be at least {} (got {})",
                    ArenaConfig::MIN_CHUNK_SIZE,
                    config.chunk_size,
                ),
            });
        }

        let data = source
            .acquire(config.chunk_size)
            .ok_or(ArenaError::OutOfMemory {
                requested: config.chunk_size,
            })?;
        let mut chunks = SmallVec::new();
        chunks.push(Chunk::new(ChunkId::next(), data));

        Ok(Self {
            chunks,
            building: None,
            source,
            config,
        })
    }

    /// Capture the current cursor as a rewind target.
    ///
    /// Equivalent to a zero-length [`alloc`](Self::alloc), but infallible
    /// and valid even while a build is open (though a mark taken mid-build
    /// goes stale if the build is later discarded).
    pub fn mark(&self) -> Mark {
        let tail = self.tail();
        Mark {
            chunk: tail.id(),
            offset: tail.used(),
        }
    }

    /// Bump-allocate `len` zero-filled bytes.
    ///
    /// Strict O(1) when the tail chunk has room; otherwise a single source
    /// call acquires a chunk large enough for the whole request. `len == 0`
    /// is valid, never advances the cursor, and repeated zero-length allocs
    /// return the same position.
    ///
    /// Fails with `BuildOpen` while an incremental build is in progress,
    /// or `OutOfMemory` if a needed chunk cannot be acquired.
    pub fn alloc(&mut self, len: usize) -> Result<AllocHandle, ArenaError> {
        if self.building.is_some() {
            return Err(ArenaError::BuildOpen);
        }
        let tail = self.tail_mut();
        if let Some(offset) = tail.alloc(len) {
            return Ok(AllocHandle::new(tail.id(), offset, len));
        }
        self.grow(len)?;
        let tail = self.tail_mut();
        let offset = tail
            .alloc(len)
            .expect("fresh chunk is sized to fit the request");
        Ok(AllocHandle::new(tail.id(), offset, len))
    }

    /// Allocate `bytes.len()` bytes and fill them from `bytes`.
    pub fn alloc_slice(&mut self, bytes: &[u8]) -> Result<AllocHandle, ArenaError> {
        let handle = self.alloc(bytes.len())?;
        if !bytes.is_empty() {
            self.tail_mut()
                .bytes_mut(handle.offset, handle.len)
                .copy_from_slice(bytes);
        }
        Ok(handle)
    }

    /// Start building an object of unknown final size at the cursor.
    ///
    /// Fails with `BuildOpen` if a build is already in progress.
    pub fn begin(&mut self) -> Result<(), ArenaError> {
        if self.building.is_some() {
            return Err(ArenaError::BuildOpen);
        }
        self.building = Some(self.tail().used());
        Ok(())
    }

    /// Append `bytes` to the object under construction.
    ///
    /// If the tail chunk cannot hold the appended bytes, the partial object
    /// migrates whole into a fresh chunk first — a growing object is never
    /// split across chunks. Fails with `NoBuild` when no build is open.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), ArenaError> {
        if self.building.is_none() {
            return Err(ArenaError::NoBuild);
        }
        if bytes.is_empty() {
            return Ok(());
        }
        if self.tail().remaining() < bytes.len() {
            self.grow(bytes.len())?;
        }
        let tail = self.tail_mut();
        let offset = tail
            .alloc(bytes.len())
            .expect("grow reserved room for the append");
        tail.bytes_mut(offset, bytes.len()).copy_from_slice(bytes);
        Ok(())
    }

    /// Append a single byte to the object under construction.
    pub fn append_byte(&mut self, byte: u8) -> Result<(), ArenaError> {
        self.append(std::slice::from_ref(&byte))
    }

    /// Bytes appended to the open build so far, or `None` when no build
    /// is open.
    pub fn building_len(&self) -> Option<usize> {
        self.building.map(|start| self.tail().used() - start)
    }

    /// Seal the object under construction and return its handle.
    ///
    /// The handle covers every byte appended since [`begin`](Self::begin).
    /// The arena does not remember the object's size; the handle is the
    /// caller's record of it. Fails with `NoBuild` when no build is open.
    pub fn finish(&mut self) -> Result<AllocHandle, ArenaError> {
        let start = self.building.take().ok_or(ArenaError::NoBuild)?;
        let tail = self.tail();
        Ok(AllocHandle::new(tail.id(), start, tail.used() - start))
    }

    /// Abandon the object under construction, reclaiming its bytes.
    ///
    /// Fails with `NoBuild` when no build is open.
    pub fn discard(&mut self) -> Result<(), ArenaError> {
        let start = self.building.take().ok_or(ArenaError::NoBuild)?;
        self.tail_mut().truncate(start);
        Ok(())
    }

    /// Free every byte allocated at or after `mark`.
    ///
    /// The chunk containing the mark becomes the tail again; every later
    /// chunk is released back to the source. Cost is proportional to the
    /// number of chunks released, never to the number of objects freed.
    ///
    /// Fails with `BuildOpen` while a build is in progress (rewinding
    /// would leave the object's base dangling), or `StaleMark` when the
    /// mark's chunk is not live in this arena — it was released by an
    /// earlier rewind, or the mark belongs to a different arena.
    pub fn rewind(&mut self, mark: Mark) -> Result<(), ArenaError> {
        if self.building.is_some() {
            return Err(ArenaError::BuildOpen);
        }
        let idx = self
            .chunks
            .iter()
            .position(|c| c.id() == mark.chunk)
            .ok_or(ArenaError::StaleMark { chunk: mark.chunk })?;
        if mark.offset > self.chunks[idx].used() {
            return Err(ArenaError::StaleMark { chunk: mark.chunk });
        }
        while self.chunks.len() > idx + 1 {
            let chunk = self.chunks.pop().expect("list is longer than idx + 1");
            self.source.release(chunk.into_data());
        }
        self.chunks[idx].truncate(mark.offset);
        Ok(())
    }

    /// Free an allocation and everything allocated after it.
    ///
    /// Shorthand for rewinding to the handle's first byte, mirroring the
    /// classic obstack idiom of freeing to an object pointer.
    pub fn rewind_to(&mut self, handle: &AllocHandle) -> Result<(), ArenaError> {
        self.rewind(handle.mark())
    }

    /// Resolve a handle to a shared view of its bytes.
    ///
    /// Fails with `StaleHandle` when the handle's chunk is not live in this
    /// arena or its range lies beyond the live region after a rewind.
    pub fn get(&self, handle: &AllocHandle) -> Result<&[u8], ArenaError> {
        let chunk = self.live_chunk(handle)?;
        Ok(chunk.bytes(handle.offset, handle.len))
    }

    /// Resolve a handle to a mutable view of its bytes.
    pub fn get_mut(&mut self, handle: &AllocHandle) -> Result<&mut [u8], ArenaError> {
        self.live_chunk(handle)?;
        let chunk = self
            .chunks
            .iter_mut()
            .find(|c| c.id() == handle.chunk)
            .expect("live_chunk verified presence");
        Ok(chunk.bytes_mut(handle.offset, handle.len))
    }

    /// Number of live chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total allocated bytes across all live chunks.
    pub fn used_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.used()).sum()
    }

    /// Total chunk storage held from the source, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.capacity()).sum()
    }

    /// The arena's configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    fn tail(&self) -> &Chunk {
        self.chunks.last().expect("arena always holds a chunk")
    }

    fn tail_mut(&mut self) -> &mut Chunk {
        self.chunks.last_mut().expect("arena always holds a chunk")
    }

    fn live_chunk(&self, handle: &AllocHandle) -> Result<&Chunk, ArenaError> {
        let chunk = self
            .chunks
            .iter()
            .find(|c| c.id() == handle.chunk)
            .ok_or(ArenaError::StaleHandle {
                chunk: handle.chunk,
            })?;
        if handle.offset + handle.len > chunk.used() {
            return Err(ArenaError::StaleHandle {
                chunk: handle.chunk,
            });
        }
        Ok(chunk)
    }

    fn acquire_chunk(&mut self, len: usize) -> Result<Chunk, ArenaError> {
        let data = self
            .source
            .acquire(len)
            .ok_or(ArenaError::OutOfMemory { requested: len })?;
        Ok(Chunk::new(ChunkId::next(), data))
    }

    /// Acquire a new tail chunk with room for `reserve` more bytes.
    ///
    /// When a build is open, the partial object's bytes move to the front
    /// of the new chunk and the old chunk's cursor rolls back to the
    /// object's base. An old chunk left empty stays linked: a zero-size
    /// mark may still target its base, so it is only reclaimed by a rewind
    /// to or before it, or by drop.
    fn grow(&mut self, reserve: usize) -> Result<(), ArenaError> {
        let partial = match self.building {
            Some(start) => self.tail().used() - start,
            None => 0,
        };
        let want = self.config.chunk_size.max(partial.saturating_add(reserve));
        let mut fresh = self.acquire_chunk(want)?;

        if let Some(start) = self.building {
            let dst = fresh
                .alloc(partial)
                .expect("fresh chunk is sized to hold the partial object");
            fresh
                .bytes_mut(dst, partial)
                .copy_from_slice(self.tail().bytes(start, partial));
            self.tail_mut().truncate(start);
            self.building = Some(dst);
        }

        self.chunks.push(fresh);
        Ok(())
    }
}

impl<S: ChunkSource> Drop for Arena<S> {
    fn drop(&mut self) {
        for chunk in self.chunks.drain(..) {
            self.source.release(chunk.into_data());
        }
    }
}
