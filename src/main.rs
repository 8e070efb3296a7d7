//! Termlayout CLI entry point.
//!
//! This binary provides the `termlayout` command, which compiles a JSON layout
//! description into a terminator config file.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use termlayout::cli::Cli;
use termlayout::error::Result;
use termlayout::ids::RandomIds;
use termlayout::loader;
use termlayout::render::{self, Renderer};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ids = RandomIds;
    let config = loader::load_config(cli.source(), &mut ids)?;

    if cli.list {
        return render::write_listing(&config, io::stdout().lock());
    }

    let out: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut renderer = Renderer::new(BufWriter::new(out), &config.templates, &mut ids);
    let result = renderer.render_config(&config);

    // Whatever was rendered before a failure still reaches the output.
    renderer.into_inner().flush()?;
    result
}
