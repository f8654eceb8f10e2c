use thiserror::Error;

/// Errors raised when a [`State`](super::State) lookup fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// No primary field is stored under the key.
    #[error("missing field `{key}`")]
    MissingField { key: String },

    /// No copy of the field is stored under the tag.
    #[error("missing `{tag}` copy of field `{key}`")]
    MissingCopy { key: String, tag: String },

    /// No mesh is registered for the domain.
    #[error("missing mesh for domain `{domain}`")]
    MissingMesh { domain: String },

    /// A field has no components or is smaller than the mesh it is defined on.
    #[error("field `{key}` has {found} cells but mesh needs at least {expected}")]
    ShapeMismatch {
        key: String,
        expected: usize,
        found: usize,
    },
}

impl StateError {
    pub(crate) fn missing_copy(key: &str, tag: &str) -> Self {
        Self::MissingCopy {
            key: key.to_owned(),
            tag: tag.to_owned(),
        }
    }
}
