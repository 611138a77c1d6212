use crate::AttributeError;

pub type ComputeFn<O, T, E> = fn(&O) -> Result<T, E>;

/// The function behind a lazy attribute, together with the name and
/// documentation the attribute takes over from it.
pub struct Computation<O, T, E = AttributeError> {
    name: &'static str,
    doc: Option<&'static str>,
    func: ComputeFn<O, T, E>,
}

impl<O, T, E> Computation<O, T, E> {
    pub const fn new(name: &'static str, func: ComputeFn<O, T, E>) -> Self {
        Self {
            name,
            doc: None,
            func,
        }
    }

    #[must_use]
    pub const fn with_doc(self, doc: &'static str) -> Self {
        Self {
            doc: Some(doc),
            ..self
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Documentation text, `None` if it was never given or is blank.
    ///
    /// Only the ends are trimmed. Text captured by [`computation!`] keeps the
    /// leading space `///` leaves on every line after the first, see
    /// [`doc_lines`](Self::doc_lines) for the cleaned up lines.
    pub fn doc(&self) -> Option<&'static str> {
        self.doc.map(str::trim).filter(|it| !it.is_empty())
    }

    /// The documentation one line at a time, without the single leading space
    /// of a `///` comment.
    pub fn doc_lines(&self) -> impl Iterator<Item = &'static str> {
        self.doc()
            .into_iter()
            .flat_map(str::lines)
            .map(|line| line.strip_prefix(' ').unwrap_or(line))
    }

    #[inline]
    pub fn call(&self, owner: &O) -> Result<T, E> {
        (self.func)(owner)
    }
}

impl<O, T, E> Clone for Computation<O, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O, T, E> Copy for Computation<O, T, E> {}

impl<O, T, E> std::fmt::Debug for Computation<O, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Computation))
            .field("name", &self.name)
            .field("doc", &self.doc())
            .finish_non_exhaustive()
    }
}

/// Builds a [`Computation`] from a function item, taking the function's name
/// and its `///` comments as the attribute's name and documentation.
///
/// The function must return a `Result` (spelled any way: `anyhow::Result<T>`,
/// `io::Result<T>` or an alias all work) and an `Err` is never cached.
/// Prefix the function with `infallible` to return a plain value instead,
/// which yields a `Computation<O, T, AttributeError>`.
#[macro_export]
macro_rules! computation {
    (
        $(#[doc = $doc:literal])*
        infallible fn $name:ident($owner:ident: &$owner_ty:ty) -> $value:ty $body:block
    ) => {{
        fn $name(
            $owner: &$owner_ty,
        ) -> ::core::result::Result<$value, $crate::AttributeError> {
            ::core::result::Result::Ok($body)
        }

        $crate::Computation::<$owner_ty, $value, $crate::AttributeError>::new(
            stringify!($name),
            $name,
        )
        .with_doc(concat!($($doc, "\n",)* ""))
    }};

    (
        $(#[doc = $doc:literal])*
        fn $name:ident($owner:ident: &$owner_ty:ty) -> $ret:ty $body:block
    ) => {{
        fn $name($owner: &$owner_ty) -> $ret $body

        $crate::Computation::<$owner_ty, _, _>::new(stringify!($name), $name)
            .with_doc(concat!($($doc, "\n",)* ""))
    }};
}
