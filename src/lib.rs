//! # Termlayout
//!
//! A compiler from a JSON workspace description to a terminator config file.
//!
//! Terminator describes layouts as flat sections linked by parent references,
//! which is tedious to write by hand. Termlayout lets you describe windows,
//! tabs, splits and terminals as a tree, with reusable command templates, and
//! writes the config for you.
//!
//! ## Features
//!
//! - **Command templates**: Named commands with parameter slots, filled per terminal
//! - **Notebooks**: Tabbed containers; single-tab notebooks are flattened away
//! - **Splits**: Horizontal and vertical two-way splits
//! - **Spreads**: Any number of terminals laid out evenly as balanced splits
//!
//! ## Quick Example
//!
//! ```json
//! {
//!   "command_templates": [
//!     { "name": "echo", "elements": [
//!         { "type": "literal", "content": "echo " }, { "type": "parameter" } ] }
//!   ],
//!   "layouts": [ { "name": "dev", "windows": [ {
//!     "maximised": true, "fullscreen": false,
//!     "size_x": 1280, "size_y": 800, "title": "dev",
//!     "main_element": { "type": "notebook", "tabs": [ { "title": "shells",
//!       "main_element": { "type": "horizontal_spread", "elements": [
//!         { "type": "templated_terminal", "title": "one", "template_name": "echo",
//!           "group": "", "profile": "default", "arguments": ["1"] },
//!         { "type": "templated_terminal", "title": "two", "template_name": "echo",
//!           "group": "", "profile": "default", "arguments": ["2"] }
//!       ] } } ] }
//!   } ] } ]
//! }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! - [`config`]: Configuration data structures
//! - [`cli`]: Command-line argument parsing with clap
//! - [`loader`]: Reading the layout description
//! - [`parser`]: JSON to layout tree conversion
//! - [`layout`]: Layout tree types
//! - [`spread`]: Balanced split construction for spreads
//! - [`template`]: Command templates
//! - [`render`]: Terminator config emission
//! - [`ids`]: Node identifier generation
//! - [`error`]: Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod ids;
pub mod layout;
pub mod loader;
pub mod parser;
pub mod render;
pub mod spread;
pub mod template;

pub use config::{Config, ConfigValue, KeyValue, Layout, Profile};
pub use error::{LayoutError, Result};
pub use layout::{AnyElement, ContainedElement, LayoutElement, Orientation, Ratio};
