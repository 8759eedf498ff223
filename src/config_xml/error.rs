use thiserror::Error;

/// Failure of a single config.xml edit.
///
/// Editors validate their arguments and structural preconditions before any
/// tree surgery, so a returned error means the document was left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigEditError {
    /// A container the edit needs is not in the document.
    #[error("required element <{element}> is missing: {context}")]
    MissingElement {
        element: String,
        context: &'static str,
    },

    /// An unsupported keyword or value supplied by the caller.
    #[error("invalid {name} '{value}', expected one of: {expected}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Something that is not a concrete plugin setting was added to a collection.
    #[error("invalid plugin setting type: {0}")]
    InvalidType(String),

    /// The base plugin setting carries no mutation of its own.
    #[error("{0} must be overridden by a concrete plugin setting")]
    NotImplemented(&'static str),

    #[error("cannot parse config document: {0}")]
    Parse(String),

    #[error("cannot serialize config document: {0}")]
    Serialize(String),
}

impl ConfigEditError {
    pub(crate) fn missing(element: &str, context: &'static str) -> Self {
        ConfigEditError::MissingElement {
            element: element.to_string(),
            context,
        }
    }
}
