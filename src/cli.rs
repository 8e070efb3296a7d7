//! Command-line interface for termlayout.
//!
//! Parses arguments using clap and provides the [`Cli`] struct containing
//! all user-specified options.

use crate::loader::Source;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for termlayout.
///
/// # Examples
///
/// ```bash
/// # Compile a layout file into a terminator config
/// termlayout -i workspace.json -o ~/.config/terminator/config
///
/// # Read the layout from stdin
/// cat workspace.json | termlayout
///
/// # Print the config for the bundled example
/// termlayout --example
///
/// # Show what a layout file defines
/// termlayout -i workspace.json --list
/// ```
#[derive(Parser, Debug)]
#[command(name = "termlayout")]
#[command(version)]
#[command(about = "Terminator layout compiler - build terminator configs from JSON")]
#[command(long_about = "Termlayout compiles a JSON description of windows, tabs, splits and\n\
    templated terminal commands into a terminator config file.\n\n\
    Spreads of any number of terminals are turned into balanced two-way splits.")]
pub struct Cli {
    /// Layout description to read. Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE", conflicts_with = "example")]
    pub input: Option<PathBuf>,

    /// File to write the config to. Writes stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compile the example layout built into the binary.
    #[arg(long)]
    pub example: bool,

    /// List the layouts, profiles and command templates instead of compiling.
    #[arg(short, long)]
    pub list: bool,
}

impl Cli {
    /// Determine where the layout description is read from.
    pub fn source(&self) -> Source<'_> {
        if self.example {
            Source::Embedded
        } else if let Some(ref path) = self.input {
            Source::File(path)
        } else {
            Source::Stdin
        }
    }
}
