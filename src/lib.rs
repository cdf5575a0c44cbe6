//! # emx-ini
//!
//! Format-preserving INI parser and in-place setting editor.
//!
//! Built for tools that apply idempotent edits to live configuration files
//! (database, source control, desktop environment) where comments,
//! indentation, ordering and unrelated settings must survive byte for byte.
//!
//! ## Model
//!
//! A file is an ordered list of lines, each classified as one of:
//!
//! ```text
//! # comment                  -> Comment
//! [branch "main"]            -> SectionHeader
//!     remote = origin        -> Setting
//! ;merge = refs/heads/main   -> CommentedSetting
//!                            -> Blank
//! ```
//!
//! Lines before the first header belong to the global section `""`.
//! Repeated headers merge into one logical section by name. Keys split at
//! the first `=`, so section names may hold quotes, spaces, `/`, `$` or `:`,
//! and keys may hold brackets, braces or a trailing `:`.
//!
//! ## Editing
//!
//! [`Document::set_value`] changes exactly one line:
//! 1. an active setting is rewritten in place, keeping its separator
//! 2. else a commented-out setting is uncommented, keeping its separator
//! 3. else a new line is added at the end of the section
//! 4. else a new `[section]` and line are added at the end of the file
//!
//! ## Example
//!
//! ```rust
//! use emx_ini::{Decoder, Edit, Encoder};
//!
//! let input = "[section1]\nfoo=foovalue\n#bar=\n";
//! let mut doc = Decoder::new().decode(input)?;
//!
//! assert_eq!(doc.get_value("section1", "foo"), Some("foovalue"));
//! assert_eq!(doc.set_value("section1", "bar", "x"), Edit::Activated);
//!
//! assert_eq!(Encoder::new().encode(&doc), "[section1]\nfoo=foovalue\nbar=x\n");
//! # Ok::<(), emx_ini::ParseError>(())
//! ```
//!
//! Reading and writing the file itself, locking and encoding detection are
//! left to the caller; [`Decoder::decode_file`] and [`Encoder::encode_to_file`]
//! cover the plain UTF-8 case.

pub mod document;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod line;

pub use document::{Document, Edit, FormatConfig, DEFAULT_SEPARATOR, GLOBAL_SECTION};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{ParseError, UnterminatedHeader};
pub use line::{classify, Line, LineKind, Setting};
