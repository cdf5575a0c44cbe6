//! INI encoder

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::document::Document;
use crate::line::Line;

/// Serializes a [`Document`] back to text.
///
/// Lines no edit touched come out exactly as they were read.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    // No options yet
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {}
    }

    /// Current raw text of every line, in document order
    pub fn encode_lines<'a>(&self, document: &'a Document) -> Vec<&'a str> {
        document.lines().iter().map(Line::raw).collect()
    }

    /// Encode a document to a string.
    ///
    /// Lines are joined with `\n`; a final newline is written if the source
    /// had one (or the document was created empty).
    pub fn encode(&self, document: &Document) -> String {
        let lines = self.encode_lines(document);
        if lines.is_empty() {
            return String::new();
        }

        let mut output = lines.join("\n");
        if document.trailing_newline() {
            output.push('\n');
        }
        output
    }

    /// Encode a document directly to a writer
    pub fn encode_to_writer<W: Write>(&self, document: &Document, mut writer: W) -> Result<()> {
        writer.write_all(self.encode(document).as_bytes())?;
        Ok(())
    }

    /// Encode a document to a file, replacing its contents
    pub fn encode_to_file(&self, document: &Document, path: &Path) -> Result<()> {
        std::fs::write(path, self.encode(document))
            .with_context(|| format!("Failed to write: {}", path.display()))
    }
}
