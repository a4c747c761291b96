//! End-to-end tests exercising the arena through its public API.

use scree::{AllocHandle, Arena, ArenaConfig, ArenaError, ChunkSource};

/// Source that records every acquire/release for balance checks.
#[derive(Default)]
struct Ledger {
    acquired: usize,
    released: usize,
}

struct LedgerSource<'a>(&'a mut Ledger);

impl ChunkSource for LedgerSource<'_> {
    fn acquire(&mut self, len: usize) -> Option<Vec<u8>> {
        self.0.acquired += 1;
        Some(vec![0; len])
    }

    fn release(&mut self, _chunk: Vec<u8>) {
        self.0.released += 1;
    }
}

/// The classic obstack verification scenario: capture a scope marker via a
/// zero-length allocation, allocate two temporaries, free the scope, and
/// observe the cursor land exactly back on the marker.
#[test]
fn scope_marker_rewind() {
    let mut arena = Arena::new(ArenaConfig::default()).unwrap();

    let scope_mark = arena.alloc(0).unwrap();
    let obj1 = arena.alloc(64).unwrap();
    let obj2 = arena.alloc(128).unwrap();
    assert_eq!(obj1.len(), 64);
    assert_eq!(obj2.len(), 128);

    arena.rewind(scope_mark.mark()).unwrap();
    assert_eq!(arena.mark(), scope_mark.mark());

    // The freed space is reused by the next allocation.
    let next = arena.alloc(64).unwrap();
    assert_eq!(next.mark(), scope_mark.mark());
}

#[test]
fn nested_scopes_unwind_in_lifo_order() {
    let mut arena = Arena::new(ArenaConfig::new(128)).unwrap();

    let outer = arena.mark();
    arena.alloc_slice(b"outer data").unwrap();
    let inner = arena.mark();
    for _ in 0..10 {
        arena.alloc(100).unwrap();
    }

    arena.rewind(inner).unwrap();
    assert_eq!(arena.mark(), inner);

    arena.rewind(outer).unwrap();
    assert_eq!(arena.mark(), outer);
    assert_eq!(arena.used_bytes(), 0);

    // The inner mark died with the outer rewind.
    assert!(matches!(
        arena.rewind(inner),
        Err(ArenaError::StaleMark { .. })
    ));
}

/// Token-text style usage: many small objects built byte-by-byte, with
/// contents surviving chunk growth, then the whole batch reclaimed at once.
#[test]
fn incremental_token_building_across_chunks() {
    let mut arena = Arena::new(ArenaConfig::new(64)).unwrap();
    let batch = arena.mark();

    let words = [
        "let",
        "mut",
        "an_identifier_rather_longer_than_most",
        "=",
        "0xDEADBEEF_usize;",
        "// trailing comment token",
    ];
    let mut handles: Vec<AllocHandle> = Vec::new();
    for word in words {
        arena.begin().unwrap();
        for &b in word.as_bytes() {
            arena.append_byte(b).unwrap();
        }
        handles.push(arena.finish().unwrap());
    }

    for (word, handle) in words.iter().zip(&handles) {
        assert_eq!(arena.get(handle).unwrap(), word.as_bytes());
        assert_eq!(handle.len(), word.len());
    }

    arena.rewind(batch).unwrap();
    for handle in &handles {
        assert!(matches!(
            arena.get(handle),
            Err(ArenaError::StaleHandle { .. })
        ));
    }
}

#[test]
fn object_larger_than_default_chunk_stays_contiguous() {
    let mut arena = Arena::new(ArenaConfig::new(64)).unwrap();
    arena.alloc(30).unwrap();

    let payload: Vec<u8> = (0..=255).cycle().take(1000).map(|b| b as u8).collect();
    let handle = arena.alloc_slice(&payload).unwrap();
    assert_eq!(arena.get(&handle).unwrap(), payload.as_slice());
}

#[test]
fn marks_do_not_transfer_between_arenas() {
    let mut a = Arena::new(ArenaConfig::default()).unwrap();
    let mut b = Arena::new(ArenaConfig::default()).unwrap();

    let mark_a = a.mark();
    let handle_a = a.alloc_slice(b"owned by a").unwrap();

    assert!(matches!(
        b.rewind(mark_a),
        Err(ArenaError::StaleMark { .. })
    ));
    assert!(matches!(
        b.get(&handle_a),
        Err(ArenaError::StaleHandle { .. })
    ));
    // The rightful owner still resolves both.
    assert_eq!(a.get(&handle_a).unwrap(), b"owned by a");
    a.rewind(mark_a).unwrap();
}

#[test]
fn every_acquired_chunk_is_released_once() {
    let mut ledger = Ledger::default();
    {
        let mut arena =
            Arena::with_source(ArenaConfig::new(64), LedgerSource(&mut ledger)).unwrap();
        let scope = arena.mark();
        for round in 0u8..3 {
            for _ in 0..6 {
                arena.alloc(48).unwrap();
            }
            arena.begin().unwrap();
            arena.append(&[round; 90]).unwrap();
            let built = arena.finish().unwrap();
            arena.rewind_to(&built).unwrap();
        }
        arena.rewind(scope).unwrap();
        assert_eq!(arena.chunk_count(), 1);
    }
    assert_eq!(ledger.acquired, ledger.released);
    assert!(ledger.acquired > 1, "growth should have occurred");
}

#[test]
fn arena_survives_source_exhaustion() {
    struct Budget(usize);
    impl ChunkSource for Budget {
        fn acquire(&mut self, len: usize) -> Option<Vec<u8>> {
            if self.0 < len {
                return None;
            }
            self.0 -= len;
            Some(vec![0; len])
        }
    }

    let mut arena = Arena::with_source(ArenaConfig::new(64), Budget(128)).unwrap();
    let first = arena.alloc(64).unwrap(); // fills the initial chunk
    arena.alloc(64).unwrap(); // second chunk consumes the remaining budget
    assert_eq!(
        arena.alloc(64),
        Err(ArenaError::OutOfMemory { requested: 64 })
    );

    // Rewinding returns capacity the arena already holds; allocation works
    // again without touching the exhausted source.
    arena.rewind_to(&first).unwrap();
    let h = arena.alloc(32).unwrap();
    assert_eq!(h.mark(), first.mark());
}
