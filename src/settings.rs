//! Settings for the `ini2cfg` front end.
//!
//! Layered with confique, lowest priority first:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Settings file         {platform config dir}/ini2cfg.toml, or --settings PATH
//!        ↑ overridden by
//! Environment vars      INI2CFG_INPUT, INI2CFG_FORMAT, INI2CFG_PREFLIGHT
//! ```
//!
//! Command-line flags sit above all of these and are applied by the caller.
//! A missing settings file is not an error.

use std::path::{Path, PathBuf};

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::render::OutputFormat;

pub const APP_NAME: &str = "ini2cfg";

#[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
pub struct Settings {
    /// INI file read when no path is given on the command line.
    #[config(default = "etc/hinterlib.ini", env = "INI2CFG_INPUT")]
    pub input: PathBuf,

    /// Output format: ini, json or flat.
    #[config(default = "ini", env = "INI2CFG_FORMAT")]
    pub format: OutputFormat,

    /// Check for the ELF assembler before parsing.
    #[config(default = false, env = "INI2CFG_PREFLIGHT")]
    pub preflight: bool,
}

impl Settings {
    /// Load from defaults, the settings file and the environment.
    ///
    /// `explicit` replaces the platform settings file when given.
    pub fn load(explicit: Option<&Path>) -> Result<Self, confique::Error> {
        let mut builder = Settings::builder().env();
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_settings_path(),
        };
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "settings file");
                builder = builder.file(path);
            }
            None => tracing::debug!("no settings directory on this platform"),
        }
        builder.load()
    }
}

/// `{platform config dir}/ini2cfg.toml`, if the platform has one.
pub fn default_settings_path() -> Option<PathBuf> {
    let proj = directories::ProjectDirs::from("", "", APP_NAME)?;
    Some(proj.config_dir().join(format!("{APP_NAME}.toml")))
}

/// Commented TOML template listing every setting with its default.
pub fn template() -> String {
    confique::toml::template::<Settings>(confique::toml::FormatOptions::default())
}
