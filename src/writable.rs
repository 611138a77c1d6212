use std::ops::Deref;

use crate::{
    attribute::{Access, Attribute, DeleteFn, SetFn, SlotMut, SlotRef},
    computation::ComputeFn,
    logging::debug,
    AttributeError, CacheSlot, Computation, LazyAttribute, Slot,
};

/// A [`LazyAttribute`] that also accepts writes.
///
/// Reads behave exactly like the wrapped attribute, which is reachable
/// through `Deref`. A write stores the value in the slot (or hands it to the
/// custom setter) and never runs the computation, so writing before the
/// first read pre-seeds the cache.
pub struct LazyWritableAttribute<O, T, E = AttributeError, S = Slot<T>>(LazyAttribute<O, T, E, S>);

impl<O, T, E, S> std::fmt::Debug for LazyWritableAttribute<O, T, E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple(stringify!(LazyWritableAttribute))
            .field(&self.0)
            .finish()
    }
}

impl<O, T, E, S> Deref for LazyWritableAttribute<O, T, E, S> {
    type Target = LazyAttribute<O, T, E, S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<O, T, E, S> From<LazyAttribute<O, T, E, S>> for LazyWritableAttribute<O, T, E, S> {
    fn from(attribute: LazyAttribute<O, T, E, S>) -> Self {
        Self(attribute)
    }
}

impl<O, T, E, S> LazyWritableAttribute<O, T, E, S> {
    pub const fn new(
        computation: Computation<O, T, E>,
        slot: SlotRef<O, S>,
        slot_mut: SlotMut<O, S>,
    ) -> Self {
        Self(LazyAttribute::new(computation, slot, slot_mut))
    }

    #[must_use]
    pub const fn with_getter(self, getter: ComputeFn<O, T, E>) -> Self {
        Self(self.0.with_getter(getter))
    }

    /// Replaces the default write, which stores straight into the slot.
    #[must_use]
    pub const fn with_setter(self, setter: SetFn<O, T, E>) -> Self {
        Self(self.0.with_setter(setter))
    }

    #[must_use]
    pub const fn with_deleter(self, deleter: DeleteFn<O, E>) -> Self {
        Self(self.0.with_deleter(deleter))
    }

    #[must_use]
    pub const fn with_doc(self, doc: &'static str) -> Self {
        Self(self.0.with_doc(doc))
    }
}

impl<O, T, E, S> LazyWritableAttribute<O, T, E, S>
where
    S: CacheSlot<T>,
{
    pub fn access<'a>(&'a self, owner: Option<&'a O>) -> Result<Access<'a, Self, T>, E> {
        match owner {
            None => Ok(Access::Attribute(self)),
            Some(owner) => self.0.get(owner).map(Access::Value),
        }
    }
}

impl<O, T, E, S> LazyWritableAttribute<O, T, E, S>
where
    S: CacheSlot<T>,
    E: From<AttributeError>,
{
    pub fn set(&self, owner: &mut O, value: T) -> Result<(), E> {
        self.assign(Some(owner), value)
    }

    /// Overwrites the cached value of `owner`, or delegates to the custom
    /// setter if there is one. Fails when there is no instance to write to.
    pub fn assign(&self, owner: Option<&mut O>, value: T) -> Result<(), E> {
        let name = self.0.name();
        let owner = owner.ok_or(AttributeError::InvalidTarget { name })?;

        match self.0.setter() {
            Some(setter) => {
                debug!(attribute = name, "delegating write to setter");
                setter(owner, value)
            }
            None => {
                debug!(attribute = name, "overwriting cached value");
                self.0.slot_mut(owner).replace(value);
                Ok(())
            }
        }
    }
}

impl<O, T, E, S> Attribute<O> for LazyWritableAttribute<O, T, E, S>
where
    S: CacheSlot<T>,
    E: From<AttributeError>,
{
    type Value = T;
    type Error = E;

    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn doc(&self) -> Option<&'static str> {
        self.0.doc()
    }

    fn is_cached(&self, owner: &O) -> bool {
        self.0.is_cached(owner)
    }

    fn get<'a>(&self, owner: &'a O) -> Result<&'a T, E>
    where
        Self: 'a,
    {
        self.0.get(owner)
    }

    fn set(&self, owner: &mut O, value: T) -> Result<(), E> {
        Self::set(self, owner, value)
    }

    fn delete(&self, owner: &mut O) -> Result<(), E> {
        self.0.delete(owner)
    }
}
