//! SyncChainHashMap: a ChainHashMap behind one whole-table lock.
//!
//! Every operation, reads included, holds the same `parking_lot::Mutex`
//! for its full duration. There is no sharding and no reader/writer split,
//! so throughput is bounded by a single lock; this suits low-contention
//! sharing.

use crate::chain_hash_map::ChainHashMap;
use crate::strategy::{StdStrategy, Strategy};
use core::hash::Hash;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

pub struct SyncChainHashMap<K, V, St = StdStrategy>
where
    St: Strategy<K, V>,
{
    inner: Mutex<ChainHashMap<K, V, St>>,
}

impl<K, V> SyncChainHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::from_map(ChainHashMap::new())
    }
}

impl<K, V> Default for SyncChainHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, St> SyncChainHashMap<K, V, St>
where
    St: Strategy<K, V>,
{
    pub fn with_strategy(strategy: St) -> Self {
        Self::from_map(ChainHashMap::with_strategy(strategy))
    }

    /// Put an existing table behind the lock.
    pub fn from_map(map: ChainHashMap<K, V, St>) -> Self {
        Self {
            inner: Mutex::new(map),
        }
    }

    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value)
    }

    /// Look up `key`. The returned guard keeps the table locked until it
    /// is dropped; other operations on this table block meanwhile.
    pub fn get(&self, key: &K) -> Option<MappedMutexGuard<'_, V>> {
        MutexGuard::try_map(self.inner.lock(), |m| m.get_mut(key)).ok()
    }

    /// Look up `key` and clone the value out, releasing the lock before
    /// returning.
    pub fn get_cloned(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Run `f` on the value for `key` while the lock is held.
    pub fn with_value<R, F>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    pub fn remove(&self, key: &K) -> bool {
        self.inner.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn occupied_buckets(&self) -> usize {
        self.inner.lock().occupied_buckets()
    }

    /// Lock the table for a batch of operations.
    pub fn lock(&self) -> MutexGuard<'_, ChainHashMap<K, V, St>> {
        self.inner.lock()
    }

    pub fn into_inner(self) -> ChainHashMap<K, V, St> {
        self.inner.into_inner()
    }

    /// Tear the table down. Taking `self` by value means no other thread
    /// can still be holding or waiting on the lock.
    pub fn destroy(self) {
        self.into_inner().destroy()
    }
}
