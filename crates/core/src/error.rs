//! Error taxonomy for extraction.
//!
//! Synthesis never fails, so every variant here comes out of [`crate::extract`].

/// Errors raised while locating an interface and collecting its methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockgenError {
    /// No interface with this name exists in the source, or the name belongs to a
    /// non-interface type. Callers scanning several files should move on to the next one.
    #[error("interface type not found: {name}")]
    DeclarationNotFound { name: String },

    /// A parameter or result fragment has unbalanced nesting or an unresolvable shape.
    #[error("malformed signature fragment {fragment:?}: {reason}")]
    MalformedFragment { fragment: String, reason: &'static str },

    /// The Go parser rejected the source text.
    #[error("source failed to parse (first error at line {line}, column {column})")]
    ParseFailure { line: usize, column: usize },

    /// The interface embeds something no mock can satisfy (type unions, `~T`, generics).
    #[error("interface {interface} has an unsupported embedded element: {member}")]
    UnsupportedMember { interface: String, member: String },
}

impl MockgenError {
    /// Only a missing declaration is worth retrying against another file.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MockgenError::DeclarationNotFound { .. })
    }

    pub(crate) fn malformed(fragment: &str, reason: &'static str) -> Self {
        MockgenError::MalformedFragment { fragment: fragment.to_string(), reason }
    }
}

pub type Result<T> = std::result::Result<T, MockgenError>;
