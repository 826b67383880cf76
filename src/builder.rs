//! Structural builder: fold a lexeme sequence into a [`ConfigDocument`].
//!
//! Pairs go to the *active scope*. Before the first section header that is
//! the global scope; afterwards it is always the most recently opened
//! section, and the global scope never reopens. When a header arrives (or
//! input ends) the open accumulator is finalized into a right-sized boxed
//! slice and handed to the scope that owned it.

use crate::error::ParseError;
use crate::lexer::Lexeme;
use crate::types::{ConfigDocument, Pair, Section};

/// Accumulates one document. Not exposed; callers only ever see the
/// finished [`ConfigDocument`].
pub(crate) struct DocumentBuilder {
    in_global: bool,
    open: Vec<Pair>,
    open_section: Option<String>,
    global_pairs: Box<[Pair]>,
    sections: Vec<Section>,
}

impl DocumentBuilder {
    pub(crate) fn new() -> Self {
        Self {
            in_global: true,
            open: Vec::new(),
            open_section: None,
            global_pairs: Box::default(),
            sections: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, lexeme: Lexeme) -> Result<(), ParseError> {
        match lexeme {
            Lexeme::Blank | Lexeme::Comment(_) => Ok(()),
            Lexeme::Pair { key, value } => {
                self.open.try_reserve(1)?;
                self.open.push(Pair::new(&key, &value));
                Ok(())
            }
            Lexeme::SectionHeader(name) => {
                self.close_scope()?;
                self.open_section = Some(name);
                Ok(())
            }
            Lexeme::Malformed(_) => Err(ParseError::Internal(
                "malformed lexeme reached the structural builder",
            )),
        }
    }

    /// Finalize whatever scope is still open and return the document.
    pub(crate) fn finish(mut self) -> Result<ConfigDocument, ParseError> {
        self.close_scope()?;
        let doc = ConfigDocument::from_parts(self.global_pairs, self.sections.into_boxed_slice());
        tracing::debug!(
            globals = doc.global_pairs().len(),
            sections = doc.sections().len(),
            "built document"
        );
        Ok(doc)
    }

    /// Hand the open accumulator to the scope that owns it and start a
    /// fresh one.
    fn close_scope(&mut self) -> Result<(), ParseError> {
        let pairs = std::mem::take(&mut self.open).into_boxed_slice();
        if self.in_global {
            self.global_pairs = pairs;
            self.in_global = false;
            return Ok(());
        }
        let Some(name) = self.open_section.take() else {
            return Err(ParseError::Internal("section scope open without a name"));
        };
        tracing::trace!(section = %name, pairs = pairs.len(), "finalized section");
        self.sections.try_reserve(1)?;
        self.sections.push(Section::new(&name, pairs));
        Ok(())
    }
}

/// Build a document from an already validated lexeme sequence.
pub fn build(lexemes: impl IntoIterator<Item = Lexeme>) -> Result<ConfigDocument, ParseError> {
    let mut builder = DocumentBuilder::new();
    for lexeme in lexemes {
        builder.push(lexeme)?;
    }
    builder.finish()
}
