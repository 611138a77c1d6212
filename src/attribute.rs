use tap::Pipe;

use crate::{
    computation::ComputeFn,
    logging::{debug, trace},
    AttributeError, CacheSlot, Computation, Slot,
};

pub type SlotRef<O, S> = fn(&O) -> &S;
pub type SlotMut<O, S> = fn(&mut O) -> &mut S;
pub type SetFn<O, T, E> = fn(&mut O, T) -> Result<(), E>;
pub type DeleteFn<O, E> = fn(&mut O) -> Result<(), E>;

/// What reading an attribute yields: the mechanism itself when there is no
/// instance to read from, the cached value otherwise.
#[derive(Debug)]
pub enum Access<'a, A, T> {
    Attribute(&'a A),
    Value(&'a T),
}

impl<'a, A, T> Access<'a, A, T> {
    pub const fn value(&self) -> Option<&'a T> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Attribute(_) => None,
        }
    }

    pub const fn attribute(&self) -> Option<&'a A> {
        match self {
            Self::Attribute(a) => Some(*a),
            Self::Value(_) => None,
        }
    }
}

/// Operations shared by [`LazyAttribute`] and
/// [`LazyWritableAttribute`](crate::LazyWritableAttribute).
pub trait Attribute<O> {
    type Value;
    type Error;

    fn name(&self) -> &'static str;
    fn doc(&self) -> Option<&'static str>;
    fn is_cached(&self, owner: &O) -> bool;
    fn get<'a>(&self, owner: &'a O) -> Result<&'a Self::Value, Self::Error>
    where
        Self: 'a;
    fn set(&self, owner: &mut O, value: Self::Value) -> Result<(), Self::Error>;
    fn delete(&self, owner: &mut O) -> Result<(), Self::Error>;
}

/// A read-only attribute of `O` computed on first read and cached in a slot
/// of type `S` that lives on each instance.
///
/// Declare one as an associated constant of the owning type, pointing it at
/// the slot field with a pair of accessors:
///
/// ```
/// use lazy_attr::{computation, AttributeError, LazyAttribute, Slot};
///
/// struct Circle {
///     radius: f64,
///     area: Slot<f64>,
/// }
///
/// impl Circle {
///     const AREA: LazyAttribute<Self, f64> = LazyAttribute::new(
///         computation! {
///             /// Area enclosed by the circle.
///             infallible fn area(circle: &Circle) -> f64 {
///                 std::f64::consts::PI * circle.radius * circle.radius
///             }
///         },
///         |c| &c.area,
///         |c| &mut c.area,
///     );
///
///     fn area(&self) -> Result<&f64, AttributeError> {
///         Self::AREA.get(self)
///     }
/// }
///
/// let circle = Circle { radius: 2.0, area: Slot::new() };
/// assert!((circle.area().unwrap() - 12.566).abs() < 1e-3);
/// assert_eq!(Circle::AREA.doc(), Some("Area enclosed by the circle."));
/// ```
pub struct LazyAttribute<O, T, E = AttributeError, S = Slot<T>> {
    computation: Computation<O, T, E>,
    slot: SlotRef<O, S>,
    slot_mut: SlotMut<O, S>,
    getter: Option<ComputeFn<O, T, E>>,
    setter: Option<SetFn<O, T, E>>,
    deleter: Option<DeleteFn<O, E>>,
    doc: Option<&'static str>,
}

impl<O, T, E, S> std::fmt::Debug for LazyAttribute<O, T, E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(LazyAttribute))
            .field("name", &self.name())
            .field("doc", &self.doc())
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .field("deleter", &self.deleter.is_some())
            .finish_non_exhaustive()
    }
}

impl<O, T, E, S> LazyAttribute<O, T, E, S> {
    pub const fn new(
        computation: Computation<O, T, E>,
        slot: SlotRef<O, S>,
        slot_mut: SlotMut<O, S>,
    ) -> Self {
        Self {
            computation,
            slot,
            slot_mut,
            getter: None,
            setter: None,
            deleter: None,
            doc: None,
        }
    }

    /// Computes missing values with `getter` instead of the computation.
    /// The result is cached all the same.
    #[must_use]
    pub const fn with_getter(self, getter: ComputeFn<O, T, E>) -> Self {
        Self {
            getter: Some(getter),
            ..self
        }
    }

    /// Hands writes to `setter`. Without one the attribute is read-only.
    #[must_use]
    pub const fn with_setter(self, setter: SetFn<O, T, E>) -> Self {
        Self {
            setter: Some(setter),
            ..self
        }
    }

    #[must_use]
    pub const fn with_deleter(self, deleter: DeleteFn<O, E>) -> Self {
        Self {
            deleter: Some(deleter),
            ..self
        }
    }

    /// Overrides the documentation taken from the computation.
    #[must_use]
    pub const fn with_doc(self, doc: &'static str) -> Self {
        Self {
            doc: Some(doc),
            ..self
        }
    }

    pub const fn name(&self) -> &'static str {
        self.computation.name()
    }

    /// Documentation set with [`with_doc`](Self::with_doc), falling back to
    /// the computation's when that is missing or blank.
    pub fn doc(&self) -> Option<&'static str> {
        self.doc
            .map(str::trim)
            .filter(|it| !it.is_empty())
            .or_else(|| self.computation.doc())
    }

    pub const fn computation(&self) -> &Computation<O, T, E> {
        &self.computation
    }

    pub(crate) fn slot_mut<'a>(&self, owner: &'a mut O) -> &'a mut S {
        (self.slot_mut)(owner)
    }

    pub(crate) const fn setter(&self) -> Option<SetFn<O, T, E>> {
        self.setter
    }
}

impl<O, T, E, S> LazyAttribute<O, T, E, S>
where
    S: CacheSlot<T>,
{
    pub fn is_cached(&self, owner: &O) -> bool {
        (self.slot)(owner).is_filled()
    }

    /// Returns the cached value, computing and storing it first if the slot
    /// is still empty. A failed computation leaves the slot empty.
    ///
    /// If the computation reads this same attribute, the inner read fills the
    /// slot first and keeps it: the outer result is dropped and the inner
    /// value returned.
    pub fn get<'a>(&self, owner: &'a O) -> Result<&'a T, E>
    where
        S: 'a,
    {
        let slot = (self.slot)(owner);

        if let Some(value) = slot.get() {
            trace!(attribute = self.name(), "cache hit");
            return Ok(value);
        }

        trace!(attribute = self.name(), "computing");
        let value = match self.getter {
            Some(getter) => getter(owner)?,
            None => self.computation.call(owner)?,
        };

        slot.fill(value).pipe(Ok)
    }

    /// Class level access when `owner` is `None`, a plain [`get`](Self::get)
    /// otherwise.
    pub fn access<'a>(&'a self, owner: Option<&'a O>) -> Result<Access<'a, Self, T>, E> {
        match owner {
            None => Ok(Access::Attribute(self)),
            Some(owner) => self.get(owner).map(Access::Value),
        }
    }
}

impl<O, T, E, S> LazyAttribute<O, T, E, S>
where
    E: From<AttributeError>,
{
    pub fn set(&self, owner: &mut O, value: T) -> Result<(), E> {
        self.assign(Some(owner), value)
    }

    /// Writes go to the custom setter. Without one the attribute is read-only.
    pub fn assign(&self, owner: Option<&mut O>, value: T) -> Result<(), E> {
        let name = self.name();
        let setter = self.setter.ok_or(AttributeError::ReadOnly { name })?;
        let owner = owner.ok_or(AttributeError::InvalidTarget { name })?;

        debug!(attribute = name, "delegating write to setter");
        setter(owner, value)
    }

    pub fn delete(&self, owner: &mut O) -> Result<(), E> {
        self.remove(Some(owner))
    }

    /// Deletion goes to the custom deleter, there is no default.
    pub fn remove(&self, owner: Option<&mut O>) -> Result<(), E> {
        let name = self.name();
        let deleter = self.deleter.ok_or(AttributeError::Undeletable { name })?;
        let owner = owner.ok_or(AttributeError::InvalidTarget { name })?;

        debug!(attribute = name, "delegating delete to deleter");
        deleter(owner)
    }
}

impl<O, T, E, S> Attribute<O> for LazyAttribute<O, T, E, S>
where
    S: CacheSlot<T>,
    E: From<AttributeError>,
{
    type Value = T;
    type Error = E;

    fn name(&self) -> &'static str {
        Self::name(self)
    }

    fn doc(&self) -> Option<&'static str> {
        Self::doc(self)
    }

    fn is_cached(&self, owner: &O) -> bool {
        Self::is_cached(self, owner)
    }

    fn get<'a>(&self, owner: &'a O) -> Result<&'a T, E>
    where
        Self: 'a,
    {
        Self::get(self, owner)
    }

    fn set(&self, owner: &mut O, value: T) -> Result<(), E> {
        Self::set(self, owner, value)
    }

    fn delete(&self, owner: &mut O) -> Result<(), E> {
        Self::delete(self, owner)
    }
}
