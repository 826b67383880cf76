//! Clap front end for the `ini2cfg` binary.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The binary is
//! a thin shell around [`run`]: it parses [`Cli`], installs logging and
//! prints whatever `run` returns.

use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;
use crate::preflight;
use crate::render::{self, OutputFormat};
use crate::settings::{self, Settings};

/// Parse a strict INI file and print the resulting document.
#[derive(Debug, Parser)]
#[command(name = "ini2cfg", version)]
pub struct Cli {
    /// INI file to read (default: the `input` setting).
    pub file: Option<PathBuf>,

    /// Output format (default: the `format` setting).
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Restrict output to this section.
    #[arg(short, long)]
    pub section: Option<String>,

    /// Print every value of this key in the selected scope (global when
    /// --section is absent), one per line.
    #[arg(short, long)]
    pub key: Option<String>,

    /// Check for the ELF assembler before parsing.
    #[arg(long)]
    pub preflight: bool,

    /// Read settings from this file instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Print a commented settings template and exit.
    #[arg(long)]
    pub settings_template: bool,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the command and return the text to print.
pub fn run(cli: &Cli) -> Result<String, Error> {
    if cli.settings_template {
        return Ok(settings::template());
    }

    let settings = Settings::load(cli.settings.as_deref())?;
    if cli.preflight || settings.preflight {
        preflight::check_all(&preflight::elf_assembler())?;
    }

    let path = cli.file.clone().unwrap_or(settings.input);
    let doc = crate::parse(&path)?;

    if let Some(key) = &cli.key {
        let values = doc.get_all(cli.section.as_deref(), key);
        if values.is_empty() {
            return Err(Error::KeyNotFound(key.clone()));
        }
        return Ok(values.join("\n"));
    }

    let format = cli.format.unwrap_or(settings.format);
    match &cli.section {
        Some(name) => {
            let section = doc
                .section(name)
                .ok_or_else(|| Error::SectionNotFound(name.clone()))?;
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(section)?),
                _ => {
                    let lines: Vec<String> =
                        section.pairs().iter().map(ToString::to_string).collect();
                    Ok(lines.join("\n"))
                }
            }
        }
        None => Ok(render::render(&doc, format)?),
    }
}
