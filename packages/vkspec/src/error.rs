//! Error types for specification extraction.
//!
//! Every failure aborts the whole parse. `VkSpecError` carries the structured
//! context of what went wrong, and [`ErrorKind`] classifies it so callers can
//! decide whether to log-and-exit or escalate.

use std::path::PathBuf;

use thiserror::Error;

/// Broad classification of a [`VkSpecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input document could not be opened or read.
    Io,
    /// An input document does not follow the grammar the extractors assume.
    Structure,
    /// The input is well-formed but internally inconsistent.
    Consistency,
}

/// Main error type for the extraction library.
#[derive(Debug, Error)]
pub enum VkSpecError {
    /// Reading an input document failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry document is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The registry document does not start with `<registry>`.
    #[error("Unknown registry format: root element is <{0}>")]
    UnknownRoot(String),

    /// An element appeared where the grammar requires a different one.
    #[error("Unexpected registry structure in {context}: expected <{expected}>, found <{found}>")]
    UnexpectedElement {
        context: String,
        expected: String,
        found: String,
    },

    /// The registry document ended in the middle of an element.
    #[error("Unexpected end of registry document in {context}")]
    UnexpectedEof { context: String },

    /// A definition that must be named has an empty name.
    #[error("Unexpected empty name in {context}")]
    EmptyName { context: String },

    /// A header declaration does not have the expected shape.
    #[error("Malformed header declaration for {type_name}: '{line}'")]
    MalformedDeclaration { type_name: String, line: String },

    /// A feature structure holds a member that is not a boolean.
    #[error("Feature structure {type_name} has a non-boolean member: '{line}'")]
    NonBooleanFeature { type_name: String, line: String },

    /// An extension is both promoted and deprecated.
    #[error("Extension {extension} is promoted to {promoted} and deprecated by {deprecated}")]
    PromotedAndDeprecated {
        extension: String,
        promoted: String,
        deprecated: String,
    },

    /// Following an alias chain revisited a name.
    #[error("Alias cycle detected: {}", .chain.join(" -> "))]
    AliasCycle { chain: Vec<String> },
}

impl VkSpecError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::XmlParse(_)
            | Self::UnknownRoot(_)
            | Self::UnexpectedElement { .. }
            | Self::UnexpectedEof { .. }
            | Self::EmptyName { .. }
            | Self::MalformedDeclaration { .. } => ErrorKind::Structure,
            Self::NonBooleanFeature { .. }
            | Self::PromotedAndDeprecated { .. }
            | Self::AliasCycle { .. } => ErrorKind::Consistency,
        }
    }

    pub(crate) fn unexpected_element(
        context: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedElement {
            context: context.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn unexpected_eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, VkSpecError>;
