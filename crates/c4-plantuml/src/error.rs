//! Error types for C4-PlantUML operations.
//!
//! This module provides the main error type [`C4Error`] which wraps the
//! error conditions that can occur while loading a workspace or rendering a
//! view.

use std::{fmt, io, ops::Range};

use thiserror::Error;

use crate::element::RenderContext;

/// The main error type for C4-PlantUML operations.
///
/// # Diagnostic Variants
///
/// The `Workspace` variant carries the workspace source and, when known, the
/// byte span of the offending input so it can be reported with context.
#[derive(Debug, Error)]
pub enum C4Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Workspace { err: WorkspaceError, src: String },

    #[error("{kind} elements cannot be rendered as a {context}")]
    UnsupportedElementKind {
        kind: &'static str,
        context: RenderContext,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("View not found: {0}")]
    ViewNotFound(String),
}

impl C4Error {
    /// Create a new `Workspace` error with the associated source text.
    pub fn new_workspace_error(err: WorkspaceError, src: impl Into<String>) -> Self {
        Self::Workspace {
            err,
            src: src.into(),
        }
    }
}

/// A workspace description that could not be turned into a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceError {
    message: String,
    span: Option<Range<usize>>,
}

impl WorkspaceError {
    pub fn new(message: impl Into<String>, span: Option<Range<usize>>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending input, if known.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid workspace: {}", self.message)
    }
}

impl From<toml::de::Error> for WorkspaceError {
    fn from(err: toml::de::Error) -> Self {
        Self::new(err.message(), err.span())
    }
}
