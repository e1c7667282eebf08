use crate::foundation::ids::SectionId;

/// Convenience result type used across the story engine.
pub type StoryResult<T> = Result<T, StoryError>;

/// Top-level error taxonomy.
///
/// Nothing here is fatal to a page session: the session logs these and keeps going.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// Navigation or lookup for a section that was never registered.
    #[error("unknown section: {0}")]
    UnknownSection(SectionId),

    /// Explicit jump outside `[0, count - 1]`.
    #[error("step out of range: {section} has {count} steps, requested index {index}")]
    OutOfRange {
        /// Section the jump targeted.
        section: SectionId,
        /// Requested zero-based index.
        index: usize,
        /// Registered step count.
        count: usize,
    },

    /// Lookup for a diagram that is not mounted in the session.
    #[error("unknown diagram: {0}")]
    UnknownDiagram(String),

    /// Invalid configuration or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid reveal plan or animation request.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    pub fn unknown_section(section: impl Into<SectionId>) -> Self {
        Self::UnknownSection(section.into())
    }

    pub fn unknown_diagram(diagram: impl Into<String>) -> Self {
        Self::UnknownDiagram(diagram.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
