//! chained-hashtable: a single-threaded hash table from case-insensitive
//! string keys to record values, with chained buckets and full-rehash
//! growth.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainedHashTable<V, S>` owns a `Vec` of optional buckets. A bucket is
//!   a `Vec` of `(key, value)` entries in insertion order, allocated the
//!   first time an insert lands in its slot.
//! - A key's slot is `hash(fold(key)) % capacity`, where `fold` maps
//!   each char to its single-char upper case, then lower case, and the hash
//!   comes from the table's `BuildHasher`.
//! - Values implement `Keyed`; the table reads a value's key only while
//!   rehashing, so it must match the key the value was inserted under.
//!
//! Constraints
//! - Keys are unique under case-insensitive comparison; duplicate inserts
//!   fail with `TableError::DuplicateKey`.
//! - `num_keys` always equals the number of stored entries.
//! - Every entry sits in the slot its key hashes to under the current
//!   capacity, which is why growth rebuilds the array instead of copying.
//! - Capacity never shrinks.
//!
//! Growth
//! - Each insert first validates its key, then checks
//!   `num_keys / capacity >= load_factor_threshold` using the count before
//!   the insert. If the check passes (or capacity is 0) the table is rebuilt
//!   with `2 * capacity + 1` slots, then the insert proceeds.
//! - Growth is a pure function from the old slot array to the new one; the
//!   key count is untouched.
//!
//! Lookup protocol
//! - `get` on a missing key is an error (`KeyNotFound`); `remove` on a
//!   missing key is `Ok(false)`.
//! - An absent key (`None`) is rejected by `insert`, `get`, and `remove`
//!   with `InvalidKey` before anything else happens.
//!
//! Notes and non-goals
//! - No ordered iteration, range queries, persistence, or internal
//!   synchronization. Mutation takes `&mut self`.
//! - Resizes are logged at `debug` and mutations at `trace` through
//!   `tracing`; installing a subscriber is up to the caller.

pub mod chained_hash_table;
mod chained_hash_table_proptest;
pub mod config;
pub mod error;
pub mod key;

// Public surface
pub use chained_hash_table::{ChainedHashTable, Iter};
pub use config::{TableConfig, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR_THRESHOLD};
pub use error::{Result, TableError};
pub use key::{keys_match, Keyed};
