use std::{cell::OnceCell, sync::OnceLock};

/// Storage for one memoized value on one owning instance.
///
/// A slot is empty until the first read (or write) and holds exactly one value
/// afterwards. Filling goes through `&self`, replacing needs `&mut self`.
pub trait CacheSlot<T> {
    fn get(&self) -> Option<&T>;

    /// Stores `value` unless the slot was filled in the meantime,
    /// and returns whatever the slot holds afterwards.
    fn fill(&self, value: T) -> &T;

    /// Overwrites the slot, filled or not.
    fn replace(&mut self, value: T);

    fn take(&mut self) -> Option<T>;

    fn is_filled(&self) -> bool {
        self.get().is_some()
    }
}

/// Single threaded slot. Owners holding one are `!Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot<T>(OnceCell<T>);

/// Slot that can be shared between threads.
///
/// Two threads racing on the first read may both run the computation,
/// the first one to store wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncSlot<T>(OnceLock<T>);

impl<T> Slot<T> {
    pub const fn new() -> Self {
        Self(OnceCell::new())
    }
}

impl<T> SyncSlot<T> {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Default for SyncSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for Slot<T> {
    fn from(value: T) -> Self {
        Self(OnceCell::from(value))
    }
}

impl<T> From<T> for SyncSlot<T> {
    fn from(value: T) -> Self {
        Self(OnceLock::from(value))
    }
}

impl<T> CacheSlot<T> for Slot<T> {
    fn get(&self) -> Option<&T> {
        self.0.get()
    }

    fn fill(&self, value: T) -> &T {
        // a reentrant read may have filled the cell already, keep that value
        self.0.get_or_init(|| value)
    }

    fn replace(&mut self, value: T) {
        self.0 = OnceCell::from(value);
    }

    fn take(&mut self) -> Option<T> {
        self.0.take()
    }
}

impl<T> CacheSlot<T> for SyncSlot<T> {
    fn get(&self) -> Option<&T> {
        self.0.get()
    }

    fn fill(&self, value: T) -> &T {
        self.0.get_or_init(|| value)
    }

    fn replace(&mut self, value: T) {
        self.0 = OnceLock::from(value);
    }

    fn take(&mut self) -> Option<T> {
        self.0.take()
    }
}
