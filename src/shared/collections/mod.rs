//! Collection helpers used on the high-frequency update paths.
mod concurrent_hash_set;
mod dictionary_equality;
mod incremental_hasher;
mod lazy_string_split;

pub use concurrent_hash_set::ConcurrentHashSet;
pub use dictionary_equality::{dictionaries_equal, dictionary_hash};
pub use incremental_hasher::{ContentHash, IncrementalHasher};
pub use lazy_string_split::LazyStringSplit;
