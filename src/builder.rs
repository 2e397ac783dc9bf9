//! Builder: assembles a closure strategy plus table options.

use crate::chain_hash_map::{check_capacity, ChainHashMap, DEFAULT_CAPACITY};
use crate::error::ConfigError;
use crate::strategy::{DestroyFn, EqualsFn, FnStrategy, HashFn};
use crate::sync_chain_hash_map::SyncChainHashMap;

/// Collects the four strategy closures and the initial capacity. All four
/// closures are required; `build` reports the first one that is missing.
///
/// ```
/// use chain_hashmap::Builder;
///
/// let mut table = Builder::<String, Vec<u8>>::new()
///     .hash(|k| k.len() as u64)
///     .equals(|a, b| a == b)
///     .destroy_key(drop)
///     .destroy_value(drop)
///     .build()
///     .unwrap();
/// table.put("key".to_string(), vec![1, 2, 3]);
/// assert_eq!(table.get(&"key".to_string()), Some(&vec![1, 2, 3]));
/// ```
pub struct Builder<K, V> {
    hash: Option<HashFn<K>>,
    equals: Option<EqualsFn<K>>,
    destroy_key: Option<DestroyFn<K>>,
    destroy_value: Option<DestroyFn<V>>,
    initial_capacity: usize,
}

impl<K, V> Builder<K, V> {
    pub fn new() -> Self {
        Self {
            hash: None,
            equals: None,
            destroy_key: None,
            destroy_value: None,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn hash<F>(mut self, f: F) -> Self
    where
        F: Fn(&K) -> u64 + Send + Sync + 'static,
    {
        self.hash = Some(Box::new(f));
        self
    }

    pub fn equals<F>(mut self, f: F) -> Self
    where
        F: Fn(&K, &K) -> bool + Send + Sync + 'static,
    {
        self.equals = Some(Box::new(f));
        self
    }

    pub fn destroy_key<F>(mut self, f: F) -> Self
    where
        F: Fn(K) + Send + Sync + 'static,
    {
        self.destroy_key = Some(Box::new(f));
        self
    }

    pub fn destroy_value<F>(mut self, f: F) -> Self
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        self.destroy_value = Some(Box::new(f));
        self
    }

    /// Bucket-array length to start with. Must be a non-zero power of two;
    /// checked by `build`.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    fn into_parts(self) -> Result<(FnStrategy<K, V>, usize), ConfigError> {
        let strategy = FnStrategy::new(
            self.hash,
            self.equals,
            self.destroy_key,
            self.destroy_value,
        )?;
        check_capacity(self.initial_capacity)?;
        Ok((strategy, self.initial_capacity))
    }

    pub fn build(self) -> Result<ChainHashMap<K, V, FnStrategy<K, V>>, ConfigError> {
        let (strategy, capacity) = self.into_parts()?;
        ChainHashMap::with_strategy_and_capacity(strategy, capacity)
    }

    pub fn build_sync(self) -> Result<SyncChainHashMap<K, V, FnStrategy<K, V>>, ConfigError> {
        self.build().map(SyncChainHashMap::from_map)
    }
}

impl<K, V> Default for Builder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyPart;

    fn full() -> Builder<u32, u32> {
        Builder::new()
            .hash(|k| u64::from(*k))
            .equals(|a, b| a == b)
            .destroy_key(drop)
            .destroy_value(drop)
    }

    #[test]
    fn complete_builder_builds() {
        let mut m = full().build().expect("all parts present");
        assert_eq!(m.capacity(), DEFAULT_CAPACITY);
        m.put(1, 2);
        assert_eq!(m.get(&1), Some(&2));
    }

    #[test]
    fn each_missing_part_is_reported() {
        let err = Builder::<u32, u32>::new()
            .equals(|a, b| a == b)
            .destroy_key(drop)
            .destroy_value(drop)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingStrategy(StrategyPart::Hash));

        let err = Builder::<u32, u32>::new()
            .hash(|k| u64::from(*k))
            .destroy_key(drop)
            .destroy_value(drop)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingStrategy(StrategyPart::Equals));

        let err = Builder::<u32, u32>::new()
            .hash(|k| u64::from(*k))
            .equals(|a, b| a == b)
            .destroy_value(drop)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingStrategy(StrategyPart::DestroyKey));

        let err = Builder::<u32, u32>::new()
            .hash(|k| u64::from(*k))
            .equals(|a, b| a == b)
            .destroy_key(drop)
            .build_sync()
            .map(|_| ())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingStrategy(StrategyPart::DestroyValue)
        );
    }

    #[test]
    fn initial_capacity_is_validated() {
        let m = full().initial_capacity(64).build().unwrap();
        assert_eq!(m.capacity(), 64);

        let err = full().initial_capacity(48).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidCapacity(48));
        let err = full().initial_capacity(0).build_sync().map(|_| ()).unwrap_err();
        assert_eq!(err, ConfigError::InvalidCapacity(0));
    }
}
