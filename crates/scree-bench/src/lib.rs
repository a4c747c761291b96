//! Benchmark profiles and helpers for the scree arena allocator.
//!
//! Provides pre-built arena configurations used by the criterion benches:
//!
//! - [`default_arena`]: 4KB chunks, the library default
//! - [`small_chunk_arena`]: 256-byte chunks, forcing frequent growth
//! - [`fill_scope`]: allocate a fixed workload of mixed-size objects

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use scree::{Arena, ArenaConfig, Mark, SystemSource};

/// Build an arena with the default 4KB chunk size.
pub fn default_arena() -> Arena<SystemSource> {
    Arena::new(ArenaConfig::default()).expect("system source never fails in benches")
}

/// Build an arena with 256-byte chunks so growth paths dominate.
pub fn small_chunk_arena() -> Arena<SystemSource> {
    Arena::new(ArenaConfig::new(256)).expect("system source never fails in benches")
}

/// Allocate `count` objects of cycling sizes (8..=64 bytes) and return the
/// mark captured before the first allocation, for a subsequent rewind.
pub fn fill_scope(arena: &mut Arena<SystemSource>, count: usize) -> Mark {
    let mark = arena.mark();
    for i in 0..count {
        let len = 8 + (i % 8) * 8;
        arena.alloc(len).expect("bench workload fits in memory");
    }
    mark
}
