//! INI decoder

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::document::{Document, FormatConfig, GLOBAL_SECTION};
use crate::error::ParseError;
use crate::line::{classify, LineKind};

const NEWLINE: char = '\n';

/// Builds a [`Document`] from INI text
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: FormatConfig,
}

impl Decoder {
    /// Create a decoder with default formatting choices
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder whose documents use `config` for new lines
    pub fn with_config(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Decode INI text.
    ///
    /// Lines are split on `\n` only, so a `\r` from CRLF files stays part of
    /// each raw line and is written back unchanged. Whether the text ended
    /// with a newline is remembered for [`Encoder::encode`](crate::Encoder::encode).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedSectionHeader`] for a `[` line with no closing `]`.
    pub fn decode(&self, input: &str) -> Result<Document, ParseError> {
        if input.is_empty() {
            return Ok(Document::with_config(self.config.clone()));
        }

        let (body, trailing_newline) = match input.strip_suffix(NEWLINE) {
            Some(body) => (body, true),
            None => (input, false),
        };

        self.build(body.split(NEWLINE), trailing_newline)
    }

    /// Decode an ordered sequence of lines, as handed over by whoever read the file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedSectionHeader`] for a `[` line with no closing `]`.
    pub fn decode_lines<I, S>(&self, lines: I) -> Result<Document, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build(lines, true)
    }

    /// Read and decode a file
    pub fn decode_file(&self, path: &Path) -> Result<Document> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;

        self.decode(&content)
            .with_context(|| format!("Failed to parse: {}", path.display()))
    }

    fn build<I, S>(&self, raw_lines: I, trailing_newline: bool) -> Result<Document, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = GLOBAL_SECTION.to_string();
        let mut seen_headers = HashSet::new();
        let mut lines = Vec::new();

        for (line_num, raw) in raw_lines.into_iter().enumerate() {
            let line = classify(raw.as_ref(), &current).map_err(|e| e.at_line(line_num + 1))?;

            if let LineKind::SectionHeader { name } = line.kind() {
                if !seen_headers.insert(name.clone()) {
                    trace!(section = %name, line = line_num + 1, "repeated section header");
                }
                current.clone_from(name);
            }

            lines.push(line);
        }

        let document = Document::from_lines(lines, self.config.clone(), trailing_newline);
        debug!(
            lines = document.lines().len(),
            sections = document.section_names().len(),
            "decoded document"
        );

        Ok(document)
    }
}
