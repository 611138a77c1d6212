use thiserror::Error;

/// Failures raised by the attribute mechanisms themselves.
///
/// Errors coming out of a computation or one of its hooks are never turned
/// into this type, they reach the caller untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeError {
    #[error("attribute `{name}` is read-only")]
    ReadOnly { name: &'static str },

    #[error("attribute `{name}` can only be set or deleted on an instance")]
    InvalidTarget { name: &'static str },

    #[error("attribute `{name}` cannot be deleted")]
    Undeletable { name: &'static str },
}

impl AttributeError {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReadOnly { name } | Self::InvalidTarget { name } | Self::Undeletable { name } => {
                name
            }
        }
    }
}
