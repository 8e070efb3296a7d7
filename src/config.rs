//! Configuration types for termlayout.
//!
//! [`Config`] is the aggregate root produced by the parser and consumed by the
//! renderer. It mirrors the sections of the terminator config file:
//! global options, key bindings, profiles and layouts. The command templates
//! travel alongside but are not emitted.
//!
//! # Input Format
//!
//! ```json
//! {
//!   "command_templates": [
//!     { "name": "echo", "elements": [
//!         { "type": "literal", "content": "echo " },
//!         { "type": "parameter" } ] }
//!   ],
//!   "global_config": [ { "key": "borderless", "value": true } ],
//!   "keybindings": [ { "key": "full_screen", "value": "F11" } ],
//!   "profiles": [ { "name": "default", "scrollback_infinite": true,
//!                   "exit_action": "hold", "font": "Monospace 10" } ],
//!   "layouts": [ { "name": "dev", "windows": [ ... ] } ]
//! }
//! ```

use crate::error::Result;
use crate::ids::IdGenerator;
use crate::layout::Window;
use crate::parser;
use crate::template::TemplateRegistry;
use serde::Deserialize;
use std::fmt;

/// Scalar value that accepts a JSON string, boolean or number.
///
/// Booleans are written the way terminator reads them (`True` / `False`);
/// everything else is written verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Default for ConfigValue {
    fn default() -> Self {
        ConfigValue::Bool(false)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(true) => f.write_str("True"),
            ConfigValue::Bool(false) => f.write_str("False"),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Text(s) => f.write_str(s),
        }
    }
}

/// A `key = value` line, used for both global options and key bindings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: ConfigValue,
}

/// An entry of the `[global_config]` section.
pub type GlobalOption = KeyValue;

/// An entry of the `[keybindings]` section.
pub type Keybinding = KeyValue;

/// A terminal profile.
///
/// # Example
///
/// ```json
/// { "name": "default", "scrollback_infinite": true, "exit_action": "hold" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub scrollback_infinite: ConfigValue,
    pub exit_action: ConfigValue,
    /// Font override. When set, the system font is disabled for this profile.
    #[serde(default)]
    pub font: Option<String>,
}

/// A named arrangement of top-level windows.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub name: String,
    pub windows: Vec<Window>,
}

/// Top-level configuration structure.
#[derive(Debug, Default)]
pub struct Config {
    pub global_config: Vec<GlobalOption>,
    pub keybindings: Vec<Keybinding>,
    pub profiles: Vec<Profile>,
    pub layouts: Vec<Layout>,
    /// Command templates referenced by terminals. Not part of the output.
    pub templates: TemplateRegistry,
}

impl Config {
    /// Parse config from a JSON string, drawing node identifiers from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LayoutError::ParseError`] if the JSON is malformed and
    /// [`crate::LayoutError::Schema`] if a node or template element is invalid.
    pub fn from_json(json: &str, ids: &mut dyn IdGenerator) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        parser::parse_config(&value, ids)
    }

    /// List all layout names in declaration order.
    pub fn list_layouts(&self) -> Vec<&str> {
        self.layouts.iter().map(|l| l.name.as_str()).collect()
    }

    /// List all profile names in declaration order.
    pub fn list_profiles(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
}
