//! ChainHashMap: bucket array, growth, and the ownership contract.

use crate::bucket::{Bucket, Entry};
use crate::error::ConfigError;
use crate::strategy::{StdStrategy, Strategy};
use core::fmt;
use core::hash::Hash;
use core::mem;

/// Bucket-array length a table starts with unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 16;

// Grow once occupied buckets reach 3/4 of the array.
const GROW_NUM: usize = 3;
const GROW_DEN: usize = 4;

pub(crate) fn check_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity.is_power_of_two() {
        Ok(())
    } else {
        Err(ConfigError::InvalidCapacity(capacity))
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Option<Bucket<K, V>>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Separate-chaining hash map that owns every key and value moved into it
/// and releases them only through its strategy.
///
/// Buckets are materialized on first insert and stay materialized until
/// the next growth, even if they become empty. `occupied_buckets` counts
/// them and drives growth, so a table that has seen many removals can grow
/// earlier than its live entries alone would warrant.
pub struct ChainHashMap<K, V, St = StdStrategy>
where
    St: Strategy<K, V>,
{
    strategy: St,
    buckets: Vec<Option<Bucket<K, V>>>,
    occupied: usize,
    len: usize,
}

impl<K, V> ChainHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_strategy(StdStrategy::new())
    }
}

impl<K, V> Default for ChainHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, St> ChainHashMap<K, V, St>
where
    St: Strategy<K, V>,
{
    pub fn with_strategy(strategy: St) -> Self {
        Self::from_parts(strategy, DEFAULT_CAPACITY)
    }

    /// `capacity` must be a non-zero power of two.
    pub fn with_strategy_and_capacity(strategy: St, capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self::from_parts(strategy, capacity))
    }

    fn from_parts(strategy: St, capacity: usize) -> Self {
        Self {
            strategy,
            buckets: empty_buckets(capacity),
            occupied: 0,
            len: 0,
        }
    }

    pub fn strategy(&self) -> &St {
        &self.strategy
    }

    /// Live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the bucket array.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Materialized buckets, including ones emptied by `remove`.
    pub fn occupied_buckets(&self) -> usize {
        self.occupied
    }

    #[inline]
    fn index_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn needs_growth(&self) -> bool {
        self.occupied * GROW_DEN >= self.buckets.len() * GROW_NUM
    }

    /// Store an entry that is known not to be present, materializing its
    /// bucket if needed. Does not touch `len`.
    fn place(&mut self, entry: Entry<K, V>) {
        let index = self.index_of(entry.hash);
        let slot = &mut self.buckets[index];
        if slot.is_none() {
            self.occupied += 1;
            log::trace!("materializing bucket {}", index);
        }
        slot.get_or_insert_with(Bucket::new).push(entry);
    }

    /// Double the bucket array and move every live entry to its new
    /// index. Uses cached hashes only; no strategy call happens here.
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity
            .checked_mul(2)
            .expect("bucket array capacity overflow");
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.occupied = 0;
        for bucket in old.into_iter().flatten() {
            for entry in bucket.into_entries() {
                self.place(entry);
            }
        }
        log::debug!(
            "grew chain table from {} to {} buckets ({} entries, {} occupied)",
            old_capacity,
            new_capacity,
            self.len,
            self.occupied
        );
    }

    /// Move `key` and `value` into the table.
    ///
    /// If an equal key is already present, its slot receives the new key
    /// and value, and the previous key and value are then handed to the
    /// strategy's destructors. The key is replaced even though it compared
    /// equal.
    pub fn put(&mut self, key: K, value: V) {
        if self.needs_growth() {
            self.grow();
        }
        let hash = self.strategy.hash(&key);
        let index = self.index_of(hash);

        let strategy = &self.strategy;
        if let Some(bucket) = self.buckets[index].as_mut() {
            if let Some(slot) = bucket.find(hash, |k| strategy.equals(k, &key)) {
                let entry = bucket
                    .get_mut(slot)
                    .expect("slot returned by find must be occupied");
                let old_key = mem::replace(&mut entry.key, key);
                let old_value = mem::replace(&mut entry.value, value);
                // Table is consistent again; user code may run.
                strategy.destroy_key(old_key);
                strategy.destroy_value(old_value);
                return;
            }
        }

        self.place(Entry { key, value, hash });
        self.len += 1;
    }

    fn entry(&self, key: &K) -> Option<&Entry<K, V>> {
        let hash = self.strategy.hash(key);
        let bucket = self.buckets[self.index_of(hash)].as_ref()?;
        let slot = bucket.find(hash, |k| self.strategy.equals(k, key))?;
        bucket.get(slot)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entry(key).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.strategy.hash(key);
        let index = self.index_of(hash);
        let strategy = &self.strategy;
        let bucket = self.buckets[index].as_mut()?;
        let slot = bucket.find(hash, |k| strategy.equals(k, key))?;
        bucket.get_mut(slot).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entry(key).is_some()
    }

    /// Remove the entry equal to `key`, destroying its key and value.
    /// Returns `false` (and destroys nothing) when no such entry exists.
    ///
    /// The vacated slot is kept for reuse and the bucket stays
    /// materialized, so `occupied_buckets` does not drop.
    pub fn remove(&mut self, key: &K) -> bool {
        let hash = self.strategy.hash(key);
        let index = self.index_of(hash);
        let strategy = &self.strategy;
        let bucket = match self.buckets[index].as_mut() {
            Some(b) => b,
            None => return false,
        };
        let entry = match bucket.find(hash, |k| strategy.equals(k, key)) {
            Some(slot) => bucket
                .take(slot)
                .expect("slot returned by find must be occupied"),
            None => return false,
        };
        self.len -= 1;
        strategy.destroy_key(entry.key);
        strategy.destroy_value(entry.value);
        true
    }

    /// Tear the table down, passing every remaining key and value to the
    /// strategy's destructors exactly once. Dropping the table does the
    /// same; this method only makes the end of life explicit.
    pub fn destroy(self) {
        drop(self)
    }
}

impl<K, V, St> Drop for ChainHashMap<K, V, St>
where
    St: Strategy<K, V>,
{
    fn drop(&mut self) {
        let buckets = mem::take(&mut self.buckets);
        let mut destroyed = 0usize;
        for bucket in buckets.into_iter().flatten() {
            for entry in bucket.into_entries() {
                self.strategy.destroy_key(entry.key);
                self.strategy.destroy_value(entry.value);
                destroyed += 1;
            }
        }
        debug_assert_eq!(destroyed, self.len);
        self.len = 0;
        self.occupied = 0;
        log::trace!("chain table torn down, {} entries destroyed", destroyed);
    }
}

impl<K, V, St> fmt::Debug for ChainHashMap<K, V, St>
where
    St: Strategy<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainHashMap")
            .field("len", &self.len)
            .field("capacity", &self.buckets.len())
            .field("occupied_buckets", &self.occupied)
            .finish_non_exhaustive()
    }
}
