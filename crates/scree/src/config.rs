//! Arena configuration parameters.

/// Configuration for the arena allocator.
///
/// Controls chunk sizing. Validated at arena construction; immutable after
/// creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Default size of each arena chunk in bytes.
    ///
    /// Default: 4096. Must be at least [`ArenaConfig::MIN_CHUNK_SIZE`].
    /// A single request larger than this produces a one-off chunk sized
    /// to fit the request; objects never span chunks.
    pub chunk_size: usize,
}

impl ArenaConfig {
    /// Default chunk size in bytes.
    pub const DEFAULT_CHUNK_SIZE: usize = 4096;

    /// Minimum permitted chunk size in bytes.
    pub const MIN_CHUNK_SIZE: usize = 64;

    /// Create a config with the given default chunk size.
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHUNK_SIZE)
    }
}
