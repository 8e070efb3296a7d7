//! Error types for termlayout.
//!
//! All errors in termlayout are represented by [`LayoutError`], which covers
//! malformed input, unknown command templates, argument count mismatches and
//! output failures.

use thiserror::Error;

/// All possible errors that can occur in termlayout.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input is not valid JSON, or its top-level shape is wrong.
    #[error("Failed to parse input: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A layout node or template element has a missing or unknown
    /// discriminant, or is malformed.
    #[error("Invalid {reason}: {raw}")]
    Schema {
        /// What was wrong with the fragment.
        reason: String,
        /// The offending JSON fragment.
        raw: String,
    },

    /// Two command templates share the same name.
    #[error("Duplicate command template: {0}")]
    DuplicateTemplate(String),

    /// A terminal references a command template that does not exist.
    #[error("Command template not found: {0}")]
    TemplateNotFound(String),

    /// A template has more parameter slots than the terminal supplied arguments.
    #[error("Not enough arguments for template '{template}': expected {expected}, got {given}")]
    NotEnoughArguments {
        template: String,
        expected: usize,
        given: usize,
    },

    /// A terminal supplied more arguments than its template has parameter slots.
    #[error("Too many arguments for template '{template}': expected {expected}, got {given}")]
    TooManyArguments {
        template: String,
        expected: usize,
        given: usize,
    },

    /// A spread was declared without any elements.
    #[error("Empty {0} spread: at least one element is required")]
    EmptySpread(&'static str),
}

impl LayoutError {
    /// Build a [`LayoutError::Schema`] carrying the offending JSON fragment.
    pub fn schema(reason: impl Into<String>, raw: &serde_json::Value) -> Self {
        LayoutError::Schema {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

/// Convenient Result type alias for termlayout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
