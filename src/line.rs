//! Line classification

use crate::error::UnterminatedHeader;

// INI syntax constants
pub const COMMENT_MARKERS: &[char] = &['#', ';'];
pub const SECTION_OPEN: char = '[';
pub const SECTION_CLOSE: char = ']';
pub const KEY_VALUE_DELIMITER: char = '=';
const CARRIAGE_RETURN: char = '\r';

/// A `key = value` assignment, active or commented out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Everything before the first `=`, trimmed
    pub key: String,
    /// Everything after the first `=`, trimmed
    pub value: String,
    /// The exact text between the key and the value, `=` included
    pub separator: String,
}

impl Setting {
    /// Split trimmed line content at its first `=`.
    ///
    /// Returns `None` if there is no `=` or the key is empty.
    pub fn parse(content: &str) -> Option<Self> {
        let delimiter = content.find(KEY_VALUE_DELIMITER)?;

        let key_part = content[..delimiter].trim_end();
        let key = key_part.trim_start();
        if key.is_empty() {
            return None;
        }

        let rest = &content[delimiter + 1..];
        let value_start = content.len() - rest.trim_start().len();

        Some(Self {
            key: key.to_string(),
            value: rest.trim().to_string(),
            separator: content[key_part.len()..value_start].to_string(),
        })
    }

    /// Render as `key<separator>value`
    pub fn render(&self) -> String {
        format!("{}{}{}", self.key, self.separator, self.value)
    }
}

/// Structural role of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only
    Blank,
    /// Inert text: `#`/`;` comments and anything unparseable
    Comment,
    /// `[name]`, name taken verbatim between the first `[` and the last `]`
    SectionHeader { name: String },
    /// An active `key = value` line
    Setting(Setting),
    /// A `#`/`;` line whose remainder parses as a setting
    CommentedSetting(Setting),
}

/// One line of an INI document: its raw text, role, and owning section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: String,
    kind: LineKind,
    section: String,
}

impl Line {
    /// The line's current text, without line terminator (a `\r` from CRLF input is kept)
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &LineKind {
        &self.kind
    }

    /// Name of the section this line belongs to; `""` for the global section.
    /// A header line belongs to the section it opens.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The active setting on this line, if any
    pub fn setting(&self) -> Option<&Setting> {
        match &self.kind {
            LineKind::Setting(setting) => Some(setting),
            _ => None,
        }
    }

    /// The commented-out setting on this line, if any
    pub fn commented_setting(&self) -> Option<&Setting> {
        match &self.kind {
            LineKind::CommentedSetting(setting) => Some(setting),
            _ => None,
        }
    }

    /// Leading whitespace of the raw text
    pub fn indent(&self) -> &str {
        let trimmed = self.raw.trim_start();
        &self.raw[..self.raw.len() - trimmed.len()]
    }

    fn has_carriage_return(&self) -> bool {
        self.raw.ends_with(CARRIAGE_RETURN)
    }

    /// Add or drop the trailing `\r` of a CRLF line
    pub(crate) fn set_carriage_return(&mut self, present: bool) {
        match (present, self.has_carriage_return()) {
            (true, false) => self.raw.push(CARRIAGE_RETURN),
            (false, true) => {
                self.raw.pop();
            }
            _ => {}
        }
    }

    /// Build a brand-new header line
    pub(crate) fn new_header(name: &str, crlf: bool) -> Self {
        Self {
            raw: terminate(format!("{SECTION_OPEN}{name}{SECTION_CLOSE}"), crlf),
            kind: LineKind::SectionHeader {
                name: name.to_string(),
            },
            section: name.to_string(),
        }
    }

    /// Build a brand-new active setting line
    pub(crate) fn new_setting(section: &str, indent: &str, setting: Setting, crlf: bool) -> Self {
        Self {
            raw: terminate(format!("{indent}{}", setting.render()), crlf),
            kind: LineKind::Setting(setting),
            section: section.to_string(),
        }
    }

    /// Rewrite this line as an active setting carrying `value`.
    ///
    /// Works on both active and commented settings: the key and separator
    /// recorded at load time are reused, the comment marker (if any) is
    /// dropped, and leading whitespace and a trailing `\r` survive.
    /// Returns `false` (and leaves the line alone) for any other kind.
    pub(crate) fn assign(&mut self, value: &str) -> bool {
        let setting = match &self.kind {
            LineKind::Setting(setting) | LineKind::CommentedSetting(setting) => Setting {
                key: setting.key.clone(),
                value: value.to_string(),
                separator: setting.separator.clone(),
            },
            _ => return false,
        };

        let raw = format!("{}{}", self.indent(), setting.render());
        self.raw = terminate(raw, self.has_carriage_return());
        self.kind = LineKind::Setting(setting);
        true
    }
}

fn terminate(mut raw: String, crlf: bool) -> String {
    if crlf {
        raw.push(CARRIAGE_RETURN);
    }
    raw
}

/// Classify one raw line.
///
/// `section` is the name of the section in effect at this point of the file;
/// it is recorded on every line except headers, which carry their own name.
/// The caller is responsible for switching sections after a header.
///
/// Decision order, first match wins:
/// 1. whitespace only → [`LineKind::Blank`]
/// 2. starts with `[` → [`LineKind::SectionHeader`], or an error if no `]` follows
/// 3. starts with `#`/`;` → [`LineKind::CommentedSetting`] if what follows the
///    run of markers is `key=value`, else [`LineKind::Comment`]
/// 4. contains `=` → [`LineKind::Setting`]
/// 5. anything else → [`LineKind::Comment`]
///
/// # Errors
///
/// Returns [`UnterminatedHeader`] when the line opens a header it never closes.
pub fn classify(raw: &str, section: &str) -> Result<Line, UnterminatedHeader> {
    let trimmed = raw.trim();
    let mut owner = section;

    let kind = if trimmed.is_empty() {
        LineKind::Blank
    } else if let Some(rest) = trimmed.strip_prefix(SECTION_OPEN) {
        let close = rest
            .rfind(SECTION_CLOSE)
            .ok_or_else(|| UnterminatedHeader(trimmed.to_string()))?;
        owner = &rest[..close];
        LineKind::SectionHeader {
            name: owner.to_string(),
        }
    } else if trimmed.starts_with(COMMENT_MARKERS) {
        // `##key`, `#;key` and `# # key` all comment out `key`
        let rest =
            trimmed.trim_start_matches(|c: char| COMMENT_MARKERS.contains(&c) || c.is_whitespace());
        Setting::parse(rest).map_or(LineKind::Comment, LineKind::CommentedSetting)
    } else {
        Setting::parse(trimmed).map_or(LineKind::Comment, LineKind::Setting)
    };

    Ok(Line {
        raw: raw.to_string(),
        kind,
        section: owner.to_string(),
    })
}
