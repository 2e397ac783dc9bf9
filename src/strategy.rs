//! Strategy: the capability bundle a table is parameterized over.
//!
//! A table never hashes, compares, or drops a key or value on its own; it
//! always goes through its strategy. Two implementations are provided:
//! `StdStrategy`, which defers to `Hash`/`Eq`/`Drop`, and `FnStrategy`,
//! which holds four caller-supplied closures and is the only one that can
//! be configured incompletely.

use crate::error::{ConfigError, StrategyPart};
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Hashing, equality, and destruction for keys of type `K` and values of
/// type `V`.
///
/// Contract for implementors:
/// - `hash` is deterministic for a key's content, and `equals(a, b)`
///   implies `hash(a) == hash(b)`.
/// - `equals` is an equivalence relation and returns `true` on match.
/// - `destroy_key`/`destroy_value` must not panic and must release
///   everything the key or value owns. Each live key and value is passed
///   to them exactly once.
pub trait Strategy<K, V> {
    fn hash(&self, key: &K) -> u64;

    fn equals(&self, a: &K, b: &K) -> bool;

    fn destroy_key(&self, key: K);

    fn destroy_value(&self, value: V);
}

/// Strategy backed by the key's own `Hash` and `Eq` impls. Destruction is
/// plain `drop`.
#[derive(Clone, Debug, Default)]
pub struct StdStrategy<S = DefaultHashBuilder> {
    hasher: S,
}

impl StdStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> StdStrategy<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<K, V, S> Strategy<K, V> for StdStrategy<S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.hasher.hash_one(key)
    }

    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }

    #[inline]
    fn destroy_key(&self, key: K) {
        drop(key);
    }

    #[inline]
    fn destroy_value(&self, value: V) {
        drop(value);
    }
}

pub type HashFn<K> = Box<dyn Fn(&K) -> u64 + Send + Sync>;
pub type EqualsFn<K> = Box<dyn Fn(&K, &K) -> bool + Send + Sync>;
pub type DestroyFn<T> = Box<dyn Fn(T) + Send + Sync>;

/// Strategy assembled from four closures.
pub struct FnStrategy<K, V> {
    hash: HashFn<K>,
    equals: EqualsFn<K>,
    destroy_key: DestroyFn<K>,
    destroy_value: DestroyFn<V>,
}

impl<K, V> FnStrategy<K, V> {
    /// Assemble a strategy, failing if any of the four parts is absent.
    /// Parts are checked in declaration order, so the error names the
    /// first missing one.
    pub fn new(
        hash: Option<HashFn<K>>,
        equals: Option<EqualsFn<K>>,
        destroy_key: Option<DestroyFn<K>>,
        destroy_value: Option<DestroyFn<V>>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            hash: hash.ok_or(ConfigError::MissingStrategy(StrategyPart::Hash))?,
            equals: equals.ok_or(ConfigError::MissingStrategy(StrategyPart::Equals))?,
            destroy_key: destroy_key
                .ok_or(ConfigError::MissingStrategy(StrategyPart::DestroyKey))?,
            destroy_value: destroy_value
                .ok_or(ConfigError::MissingStrategy(StrategyPart::DestroyValue))?,
        })
    }
}

impl<K, V> Strategy<K, V> for FnStrategy<K, V> {
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        (self.equals)(a, b)
    }

    #[inline]
    fn destroy_key(&self, key: K) {
        (self.destroy_key)(key)
    }

    #[inline]
    fn destroy_value(&self, value: V) {
        (self.destroy_value)(value)
    }
}

impl<K, V> fmt::Debug for FnStrategy<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStrategy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> (
        Option<HashFn<u32>>,
        Option<EqualsFn<u32>>,
        Option<DestroyFn<u32>>,
        Option<DestroyFn<u32>>,
    ) {
        (
            Some(Box::new(|k: &u32| *k as u64)),
            Some(Box::new(|a: &u32, b: &u32| a == b)),
            Some(Box::new(drop::<u32>)),
            Some(Box::new(drop::<u32>)),
        )
    }

    #[test]
    fn fn_strategy_requires_every_part() {
        let (h, e, dk, dv) = complete();
        assert!(FnStrategy::<u32, u32>::new(h, e, dk, dv).is_ok());

        let (_, e, dk, dv) = complete();
        let err = FnStrategy::<u32, u32>::new(None, e, dk, dv).unwrap_err();
        assert_eq!(err, ConfigError::MissingStrategy(StrategyPart::Hash));

        let (h, _, dk, dv) = complete();
        let err = FnStrategy::<u32, u32>::new(h, None, dk, dv).unwrap_err();
        assert_eq!(err, ConfigError::MissingStrategy(StrategyPart::Equals));

        let (h, e, _, dv) = complete();
        let err = FnStrategy::<u32, u32>::new(h, e, None, dv).unwrap_err();
        assert_eq!(err, ConfigError::MissingStrategy(StrategyPart::DestroyKey));

        let (h, e, dk, _) = complete();
        let err = FnStrategy::<u32, u32>::new(h, e, dk, None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingStrategy(StrategyPart::DestroyValue)
        );
    }

    /// The first absent part in declaration order is reported.
    #[test]
    fn fn_strategy_reports_first_missing_part() {
        let err = FnStrategy::<u32, u32>::new(None, None, None, None).unwrap_err();
        assert_eq!(err, ConfigError::MissingStrategy(StrategyPart::Hash));
    }

    #[test]
    fn fn_strategy_dispatches_to_closures() {
        let (h, e, dk, dv) = complete();
        let s = FnStrategy::<u32, u32>::new(h, e, dk, dv).unwrap();
        assert_eq!(s.hash(&7), 7);
        assert!(s.equals(&3, &3));
        assert!(!s.equals(&3, &4));
    }

    #[test]
    fn std_strategy_is_consistent_with_eq() {
        let s: StdStrategy = StdStrategy::default();
        let a = "key".to_string();
        let b = "key".to_string();
        assert!(Strategy::<String, ()>::equals(&s, &a, &b));
        assert_eq!(
            Strategy::<String, ()>::hash(&s, &a),
            Strategy::<String, ()>::hash(&s, &b)
        );
    }
}
