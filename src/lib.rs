//! chain-hashmap: a separate-chaining map that owns its keys and values
//! and releases them only through a caller-supplied strategy.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a reusable table whose hashing, equality, and destruction are
//!   injected, with the ownership of every key and value made explicit.
//! - Layers:
//!   - Bucket<K, V>: one collision chain. Slots live in a `SlotMap`, so a
//!     removed entry leaves a vacancy that the next insert into the same
//!     bucket reuses; slot capacity doubles and never shrinks.
//!   - ChainHashMap<K, V, St>: bucket array, counts, growth, and the
//!     destruction contract. Single-threaded, driven through `&mut self`.
//!   - SyncChainHashMap<K, V, St>: the same table behind one
//!     `parking_lot::Mutex` taken for every operation.
//!   - Strategy<K, V>: the {hash, equals, destroy_key, destroy_value}
//!     bundle. `StdStrategy` uses `Hash`/`Eq`/`Drop`; `FnStrategy` holds
//!     closures and is assembled by `Builder`.
//!
//! Ownership
//! - `put` consumes its key and value. When an equal key is present the
//!   slot takes the new pair and the old key and value go to the
//!   strategy's destructors.
//! - `remove` and teardown (`destroy` or `Drop`) pass each live key and
//!   value to the destructors exactly once. Growth only moves entries.
//! - Destructors run after the table is consistent again, so a panicking
//!   destructor cannot leave a half-updated bucket behind.
//!
//! Growth
//! - Trigger: materialized buckets reach 3/4 of the bucket array, checked
//!   at the start of `put`. The array doubles and every entry moves to
//!   `hash mod new_capacity`.
//! - Each entry caches its hash at insert, so growth never calls back into
//!   the strategy.
//! - A bucket emptied by `remove` still counts as occupied until the next
//!   growth drops it. Growth can therefore fire earlier than live entries
//!   alone would justify.
//!
//! Constraints
//! - No iteration API, no shrinking, no ordering guarantees.
//! - One lock for the whole table in the concurrent variant; reads
//!   serialize with writes and with each other.
//! - Allocation failure aborts, as everywhere in `std`.

mod bucket;
mod builder;
pub mod chain_hash_map;
mod chain_hash_map_proptest;
mod error;
pub mod strategy;
pub mod sync_chain_hash_map;

// Public surface
pub use builder::Builder;
pub use chain_hash_map::{ChainHashMap, DEFAULT_CAPACITY};
pub use error::{ConfigError, StrategyPart};
pub use strategy::{FnStrategy, StdStrategy, Strategy};
pub use sync_chain_hash_map::SyncChainHashMap;
