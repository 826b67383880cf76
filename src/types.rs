//! The parsed document and the bounded fields it is made of.
//!
//! A [`ConfigDocument`] is built once by the structural builder and never
//! mutated afterwards. Every collection it hands out is a right-sized boxed
//! slice; there is no way to push into a finished document.
//!
//! # Field bounds
//!
//! | Field        | Bound                 |
//! |--------------|-----------------------|
//! | section name | [`MAX_NAME`] bytes    |
//! | key          | [`MAX_KEY`] bytes     |
//! | value        | [`MAX_VALUE`] bytes   |
//!
//! Longer input is silently cut to the bound when the [`Pair`] or
//! [`Section`] is constructed. Truncation is not an error.

use std::fmt;

use serde::Serialize;

/// Maximum retained length of a section name, in bytes.
pub const MAX_NAME: usize = 128;

/// Maximum retained length of a key, in bytes.
pub const MAX_KEY: usize = 256;

/// Maximum retained length of a value, in bytes.
pub const MAX_VALUE: usize = 4096;

/// Copy at most `max` bytes of `text`.
///
/// Input reaching the builder is ASCII, so the cut always lands on a char
/// boundary; the back-off loop only matters for callers constructing pairs
/// by hand.
pub(crate) fn truncate_to(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    tracing::warn!(len = text.len(), max, "truncating field");
    text[..end].to_string()
}

/// One `key=value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    key: String,
    value: String,
}

impl Pair {
    /// Build a pair, truncating the key to [`MAX_KEY`] and the value to
    /// [`MAX_VALUE`] bytes.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: truncate_to(key, MAX_KEY),
            value: truncate_to(value, MAX_VALUE),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A named `[section]` and the pairs that followed its header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    name: String,
    pairs: Box<[Pair]>,
}

impl Section {
    /// Build a finalized section. The name is truncated to [`MAX_NAME`] bytes.
    pub fn new(name: &str, pairs: Box<[Pair]>) -> Self {
        Self {
            name: truncate_to(name, MAX_NAME),
            pairs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// First value stored under `key` in this section.
    pub fn get(&self, key: &str) -> Option<&str> {
        first_value(&self.pairs, key)
    }
}

/// The result of a successful parse: global pairs, then sections in file
/// order.
///
/// Rendering with [`Display`](fmt::Display) produces canonical INI text
/// that parses back into the same structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    global_pairs: Box<[Pair]>,
    sections: Box<[Section]>,
}

impl ConfigDocument {
    pub(crate) fn from_parts(global_pairs: Box<[Pair]>, sections: Box<[Section]>) -> Self {
        Self {
            global_pairs,
            sections,
        }
    }

    /// Pairs that appeared before the first section header.
    pub fn global_pairs(&self) -> &[Pair] {
        &self.global_pairs
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// True when the file held no pairs and no sections.
    pub fn is_empty(&self) -> bool {
        self.global_pairs.is_empty() && self.sections.is_empty()
    }

    /// First section called `name`. Sections are not merged, so a repeated
    /// header yields several sections with the same name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// First value of `key` in the given scope (`None` = global).
    pub fn get(&self, section: Option<&str>, key: &str) -> Option<&str> {
        match section {
            None => first_value(&self.global_pairs, key),
            Some(name) => self.section(name)?.get(key),
        }
    }

    /// Every value of `key` in the given scope, in file order.
    ///
    /// For a named scope this walks all sections carrying that name.
    pub fn get_all<'a>(&'a self, section: Option<&str>, key: &str) -> Vec<&'a str> {
        let scopes: Vec<&[Pair]> = match section {
            None => vec![&self.global_pairs[..]],
            Some(name) => self
                .sections
                .iter()
                .filter(|s| s.name == name)
                .map(|s| s.pairs())
                .collect(),
        };
        scopes
            .into_iter()
            .flatten()
            .filter(|p| p.key == key)
            .map(|p| p.value.as_str())
            .collect()
    }
}

fn first_value<'a>(pairs: &'a [Pair], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|p| p.key == key)
        .map(|p| p.value.as_str())
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in self.global_pairs.iter() {
            writeln!(f, "{pair}")?;
        }
        for section in self.sections.iter() {
            writeln!(f, "[{}]", section.name)?;
            for pair in section.pairs.iter() {
                writeln!(f, "{pair}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigDocument {
        ConfigDocument::from_parts(
            vec![Pair::new("tp", "linux,gba"), Pair::new("ver", "1.2.3")].into_boxed_slice(),
            vec![
                Section::new("zlib.src", vec![Pair::new("url", "https://x")].into()),
                Section::new("empty", Box::default()),
                Section::new(
                    "zlib.src",
                    vec![Pair::new("url", "https://y"), Pair::new("url", "https://z")].into(),
                ),
            ]
            .into_boxed_slice(),
        )
    }

    #[test]
    fn pair_truncates_key_and_value() {
        let long_key = "k".repeat(MAX_KEY + 10);
        let long_value = "v".repeat(MAX_VALUE + 1);
        let pair = Pair::new(&long_key, &long_value);
        assert_eq!(pair.key().len(), MAX_KEY);
        assert_eq!(pair.value().len(), MAX_VALUE);
    }

    #[test]
    fn section_truncates_name() {
        let section = Section::new(&"n".repeat(200), Box::default());
        assert_eq!(section.name().len(), MAX_NAME);
    }

    #[test]
    fn truncate_backs_off_to_char_boundary() {
        // 'é' is two bytes; a cut at 1 would split it
        assert_eq!(truncate_to("éa", 1), "");
        assert_eq!(truncate_to("aé", 2), "a");
    }

    #[test]
    fn get_global_and_sectioned() {
        let doc = sample();
        assert_eq!(doc.get(None, "ver"), Some("1.2.3"));
        assert_eq!(doc.get(Some("zlib.src"), "url"), Some("https://x"));
        assert_eq!(doc.get(Some("missing"), "url"), None);
        assert_eq!(doc.get(None, "url"), None);
    }

    #[test]
    fn get_all_walks_repeated_sections() {
        let doc = sample();
        assert_eq!(
            doc.get_all(Some("zlib.src"), "url"),
            vec!["https://x", "https://y", "https://z"]
        );
        assert!(doc.get_all(Some("empty"), "url").is_empty());
    }

    #[test]
    fn display_renders_canonical_ini() {
        let text = sample().to_string();
        assert_eq!(
            text,
            "tp=linux,gba\nver=1.2.3\n[zlib.src]\nurl=https://x\n[empty]\n\
             [zlib.src]\nurl=https://y\nurl=https://z\n"
        );
    }

    #[test]
    fn default_document_is_empty() {
        assert!(ConfigDocument::default().is_empty());
        assert!(!sample().is_empty());
    }
}
