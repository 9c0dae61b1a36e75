//! Error types for template context resolution.

use crate::context::ChildType;
use thiserror::Error;

/// Coarse classification shared by both error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A path could not be resolved against the scope chain
    Resolution,
    /// A type could not be used the way the template uses it
    Type,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Wildcard type without an upper bound: {0}")]
    UnboundedWildcard(String),
    #[error("Unresolved type: {0}")]
    Unresolved(String),
    #[error("Value of type {0} can't be rendered as text")]
    NotRenderable(String),
    #[error("Value of type {0} can't be used as a section")]
    NotSection(String),
}

impl TypeError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Type
    }
}

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Field not found in current context: '{name}' (scope type {scope})")]
    FieldNotFound { name: String, scope: String },
    #[error("Current section can't be inverted")]
    CurrentSectionInverted,
    #[error("Current section can't be parent")]
    CurrentSectionParent,
    #[error("Link kind {0:?} is not allowed at a lookup step")]
    IllegalChildType(ChildType),
    #[error("Can't use '{name}' field for rendering")]
    InvalidField {
        name: String,
        #[source]
        source: TypeError,
    },
    #[error("Unable to render field '{expression}'")]
    Render {
        expression: String,
        #[source]
        source: TypeError,
    },
    #[error("Unable to enter section '{expression}'")]
    Section {
        expression: String,
        #[source]
        source: TypeError,
    },
    #[error("Invalid root data type")]
    RootContext(#[source] TypeError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContextError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Resolution
    }

    /// The type error behind this failure, if any.
    pub fn type_error(&self) -> Option<&TypeError> {
        match self {
            ContextError::InvalidField { source, .. }
            | ContextError::Render { source, .. }
            | ContextError::Section { source, .. }
            | ContextError::RootContext(source) => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContextError>;
