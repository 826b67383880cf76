//! Output formats for a parsed document.
//!
//! - [`OutputFormat::Ini`] — canonical INI, the document's `Display` form.
//! - [`OutputFormat::Json`] — pretty JSON via `serde_json`.
//! - [`OutputFormat::Flat`] — one `key = value` line per pair, section pairs
//!   prefixed with `section.`. Section names may themselves contain dots, so
//!   this form is for reading, not for parsing back.

use serde::{Deserialize, Serialize};

use crate::types::ConfigDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Ini,
    Json,
    Flat,
}

/// Render `doc` in the requested format.
pub fn render(doc: &ConfigDocument, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Ini => Ok(doc.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(doc),
        OutputFormat::Flat => Ok(flatten(doc)
            .into_iter()
            .map(|(key, value)| format!("{key} = {value}"))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Every pair as a `(dotted_key, value)` entry, globals first.
pub fn flatten(doc: &ConfigDocument) -> Vec<(String, String)> {
    let globals = doc
        .global_pairs()
        .iter()
        .map(|p| (p.key().to_string(), p.value().to_string()));
    let sectioned = doc.sections().iter().flat_map(|s| {
        s.pairs()
            .iter()
            .map(move |p| (format!("{}.{}", s.name(), p.key()), p.value().to_string()))
    });
    globals.chain(sectioned).collect()
}
