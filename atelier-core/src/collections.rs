use std::hash::{BuildHasher, Hash, Hasher};
use foldhash::fast::{FixedState, FoldHasher};

pub type SmallVec<A> = smallvec::SmallVec<A>;

pub mod hashmap {
    pub type HashMap<K, V> = hashbrown::HashMap<K, V>;
    pub use hashbrown::hash_map::*;
}

/// Hasher whose output only depends on the input and the seed, never on the process.
pub struct StableHasher(FoldHasher);

impl StableHasher {
    pub const DEFAULT_SEED: u64 = 0x5eed_a7e1_1e25_0001;

    pub fn new() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(FixedState::with_seed(seed).build_hasher())
    }

    pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = Self::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for StableHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        self.0.finish()
    }

    #[inline(always)]
    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes);
    }
}
