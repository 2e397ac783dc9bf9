//! Bucket: the collision chain for one table index.
//!
//! Slots live in a `SlotMap`. Removing an entry vacates its slot, and the
//! vacancy is handed to the next insert into the same bucket before any
//! new storage is claimed. Slot capacity starts at `INITIAL_SLOTS` and is
//! doubled explicitly when every slot is occupied; it never shrinks.

use slotmap::{DefaultKey, SlotMap};

pub(crate) const INITIAL_SLOTS: usize = 4;

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

#[derive(Debug)]
pub(crate) struct Bucket<K, V> {
    slots: SlotMap<DefaultKey, Entry<K, V>>,
}

impl<K, V> Bucket<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: SlotMap::with_capacity(INITIAL_SLOTS),
        }
    }

    /// Number of occupied slots.
    pub(crate) fn live(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slot_capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Linear scan for an occupied slot whose key matches. `eq` is only
    /// consulted for entries whose cached hash equals `hash`.
    pub(crate) fn find<F>(&self, hash: u64, mut eq: F) -> Option<DefaultKey>
    where
        F: FnMut(&K) -> bool,
    {
        self.slots
            .iter()
            .find(|(_, e)| e.hash == hash && eq(&e.key))
            .map(|(slot, _)| slot)
    }

    pub(crate) fn get(&self, slot: DefaultKey) -> Option<&Entry<K, V>> {
        self.slots.get(slot)
    }

    pub(crate) fn get_mut(&mut self, slot: DefaultKey) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot)
    }

    /// Store an entry, reusing a vacant slot when there is one and
    /// doubling the slot capacity when there is not.
    pub(crate) fn push(&mut self, entry: Entry<K, V>) -> DefaultKey {
        let cap = self.slots.capacity();
        if self.slots.len() >= cap {
            self.slots.reserve(cap.max(1));
        }
        self.slots.insert(entry)
    }

    /// Vacate a slot and hand its entry back. The slot becomes a tombstone
    /// available to later pushes.
    pub(crate) fn take(&mut self, slot: DefaultKey) -> Option<Entry<K, V>> {
        self.slots.remove(slot)
    }

    /// Consume the bucket, yielding every live entry.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = Entry<K, V>> {
        self.slots.into_iter().map(|(_, e)| e)
    }
}
