//! Command templates.
//!
//! A template is a named sequence of literal text and parameter slots. Each
//! terminal names a template and supplies one argument per slot; the
//! arguments are substituted left to right to build the terminal's command.
//!
//! # Example
//!
//! ```
//! use termlayout::template::{CommandTemplate, TemplateElement};
//!
//! let echo = CommandTemplate::new(
//!     "echo",
//!     vec![TemplateElement::Literal("echo ".into()), TemplateElement::Parameter],
//! );
//! assert_eq!(echo.render(&["hi".to_string()]).unwrap(), "echo hi");
//! assert!(echo.render(&[]).is_err());
//! ```

use crate::error::{LayoutError, Result};
use std::collections::HashMap;

/// One segment of a command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateElement {
    /// Fixed text copied verbatim.
    Literal(String),
    /// Slot filled by the next unused argument.
    Parameter,
}

/// A named, reusable command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub name: String,
    pub elements: Vec<TemplateElement>,
}

impl CommandTemplate {
    pub fn new(name: impl Into<String>, elements: Vec<TemplateElement>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// Number of parameter slots, i.e. the exact argument count `render` accepts.
    pub fn parameter_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, TemplateElement::Parameter))
            .count()
    }

    /// Substitute `arguments` into the parameter slots, in order.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::NotEnoughArguments`] if a slot is reached with no argument left
    /// - [`LayoutError::TooManyArguments`] if arguments remain after the last element
    pub fn render(&self, arguments: &[String]) -> Result<String> {
        let mut remaining = arguments.iter();
        let mut command = String::new();

        for element in &self.elements {
            match element {
                TemplateElement::Literal(text) => command.push_str(text),
                TemplateElement::Parameter => {
                    let arg = remaining.next().ok_or_else(|| LayoutError::NotEnoughArguments {
                        template: self.name.clone(),
                        expected: self.parameter_count(),
                        given: arguments.len(),
                    })?;
                    command.push_str(arg);
                }
            }
        }

        if remaining.next().is_some() {
            return Err(LayoutError::TooManyArguments {
                template: self.name.clone(),
                expected: self.parameter_count(),
                given: arguments.len(),
            });
        }

        Ok(command)
    }
}

/// Templates indexed by name. Built once by the parser, read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<String, CommandTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateTemplate`] if the name is already taken.
    pub fn insert(&mut self, template: CommandTemplate) -> Result<()> {
        if self.templates.contains_key(&template.name) {
            return Err(LayoutError::DuplicateTemplate(template.name));
        }
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Look up a template by name.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TemplateNotFound`] if no template has that name.
    pub fn get(&self, name: &str) -> Result<&CommandTemplate> {
        self.templates
            .get(name)
            .ok_or_else(|| LayoutError::TemplateNotFound(name.to_string()))
    }

    /// List all template names, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        let mut result: Vec<_> = self.templates.keys().map(String::as_str).collect();
        result.sort();
        result
    }
}
