//! Document model, queries and in-place edits

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::line::{Line, LineKind, Setting};

/// Name of the implicit section holding every line before the first header
pub const GLOBAL_SECTION: &str = "";
/// Separator used for new settings when the caller supplies none
pub const DEFAULT_SEPARATOR: &str = " = ";

/// Formatting choices applied when a setting line has to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Separator written between key and value of brand-new settings
    pub default_separator: String,
    /// Indent appended settings like the last active setting of their section
    pub inherit_indent: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            default_separator: DEFAULT_SEPARATOR.to_string(),
            inherit_indent: true,
        }
    }
}

/// What a call to [`Document::set_value`] did to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// The active setting already had this value; nothing was rewritten
    Unchanged,
    /// An active setting was rewritten in place
    Updated,
    /// A commented-out setting was uncommented and rewritten in place
    Activated,
    /// A new setting line was added to an existing section
    Appended,
    /// A new section header and setting line were added at the end
    SectionCreated,
}

impl Edit {
    /// Whether the document text changed
    pub fn is_change(self) -> bool {
        self != Edit::Unchanged
    }
}

/// Per-section lookup data, all positions index into `Document::lines`
#[derive(Debug, Clone, Default)]
struct SectionIndex {
    name: String,
    has_header: bool,
    last_line: Option<usize>,
    /// key -> last active occurrence
    settings: HashMap<String, usize>,
    /// key -> last commented-out occurrence
    commented: HashMap<String, usize>,
}

/// Sections in first-appearance order, global first
#[derive(Debug, Clone, Default)]
struct SectionTable {
    entries: Vec<SectionIndex>,
    by_name: HashMap<String, usize>,
}

impl SectionTable {
    fn build(lines: &[Line]) -> Self {
        let mut table = Self::default();
        table.slot(GLOBAL_SECTION);

        for (i, line) in lines.iter().enumerate() {
            let entry = table.slot(line.section());
            entry.last_line = Some(i);
            match line.kind() {
                LineKind::SectionHeader { .. } => entry.has_header = true,
                LineKind::Setting(setting) => {
                    entry.settings.insert(setting.key.clone(), i);
                }
                LineKind::CommentedSetting(setting) => {
                    entry.commented.insert(setting.key.clone(), i);
                }
                LineKind::Blank | LineKind::Comment => {}
            }
        }

        table
    }

    fn slot(&mut self, name: &str) -> &mut SectionIndex {
        let idx = match self.by_name.get(name) {
            Some(&idx) => idx,
            None => {
                self.entries.push(SectionIndex {
                    name: name.to_string(),
                    ..SectionIndex::default()
                });
                self.by_name.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    fn get(&self, name: &str) -> Option<&SectionIndex> {
        self.by_name.get(name).and_then(|&idx| self.entries.get(idx))
    }
}

/// A parsed INI file that can be queried and edited without disturbing
/// lines it does not touch.
///
/// Lines live in one ordered `Vec`; sections and keys are resolved through an
/// index of line positions that is rebuilt whenever lines are inserted or
/// removed. Build one with [`Decoder`](crate::Decoder) and write it back with
/// [`Encoder`](crate::Encoder).
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    sections: SectionTable,
    config: FormatConfig,
    trailing_newline: bool,
    crlf: bool,
    modified: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document (only the implicit global section)
    pub fn new() -> Self {
        Self::with_config(FormatConfig::default())
    }

    /// Create an empty document with custom formatting choices
    pub fn with_config(config: FormatConfig) -> Self {
        Self::from_lines(Vec::new(), config, true)
    }

    /// Assemble a document from already-classified lines
    pub(crate) fn from_lines(lines: Vec<Line>, config: FormatConfig, trailing_newline: bool) -> Self {
        let sections = SectionTable::build(&lines);
        let crlf = lines.first().is_some_and(|line| line.raw().ends_with('\r'));
        Self {
            lines,
            sections,
            config,
            trailing_newline,
            crlf,
            modified: false,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Whether the source text ended with a newline
    pub fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Whether any edit since loading changed a line
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Section names in first-appearance order, starting with the global `""`.
    ///
    /// Repeated headers are listed once.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections
            .entries
            .iter()
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// `true` for the global section, otherwise whether a header for `section` exists
    pub fn contains_section(&self, section: &str) -> bool {
        section == GLOBAL_SECTION || self.sections.get(section).is_some_and(|entry| entry.has_header)
    }

    /// Value of the last active `key` in `section`.
    ///
    /// Commented-out settings are not visible here.
    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        let idx = *self.sections.get(section)?.settings.get(key)?;
        self.lines
            .get(idx)
            .and_then(Line::setting)
            .map(|setting| setting.value.as_str())
    }

    /// All active settings of `section`; the last occurrence of a duplicated key wins.
    ///
    /// Unknown or empty sections yield an empty map.
    pub fn get_settings(&self, section: &str) -> BTreeMap<String, String> {
        let Some(entry) = self.sections.get(section) else {
            return BTreeMap::new();
        };

        entry
            .settings
            .values()
            .filter_map(|&idx| self.lines.get(idx).and_then(Line::setting))
            .map(|setting| (setting.key.clone(), setting.value.clone()))
            .collect()
    }

    /// Assign `value` to `key` in `section`, using the configured default
    /// separator if a new line has to be written.
    ///
    /// See [`set_value_with_separator`](Self::set_value_with_separator).
    pub fn set_value(&mut self, section: &str, key: &str, value: &str) -> Edit {
        let separator = self.config.default_separator.clone();
        self.set_value_with_separator(section, key, &separator, value)
    }

    /// Assign `value` to `key` in `section`.
    ///
    /// Exactly one of these applies, in order:
    /// 1. an active setting exists: its value is replaced in place, keeping the
    ///    line's own separator (`separator` is ignored)
    /// 2. a commented-out setting exists: it is uncommented and given the new
    ///    value, keeping the separator it was written with (`separator` is ignored)
    /// 3. the section exists: a new line `key<separator>value` is added as the
    ///    section's last line
    /// 4. otherwise a `[section]` header and the new line are added at the end
    ///
    /// No pre-existing line is ever removed or reordered.
    pub fn set_value_with_separator(
        &mut self,
        section: &str,
        key: &str,
        separator: &str,
        value: &str,
    ) -> Edit {
        let (active, commented) = match self.sections.get(section) {
            Some(entry) => (entry.settings.get(key).copied(), entry.commented.get(key).copied()),
            None => (None, None),
        };

        let edit = if let Some(idx) = active {
            self.update_line(idx, value)
        } else if let Some(idx) = commented {
            self.update_line(idx, value);
            Edit::Activated
        } else if self.contains_section(section) {
            self.append_setting(section, key, separator, value);
            Edit::Appended
        } else {
            self.create_section(section, key, separator, value);
            Edit::SectionCreated
        };

        debug!(section, key, ?edit, "set value");
        edit
    }

    /// Delete every active `key` line in `section`.
    ///
    /// Commented-out occurrences are kept, so a later `set_value` can
    /// reactivate them. Returns whether anything was removed.
    pub fn remove_setting(&mut self, section: &str, key: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| {
            !(line.section() == section && line.setting().is_some_and(|setting| setting.key == key))
        });

        let removed = before - self.lines.len();
        if removed > 0 {
            if self.crlf && !self.trailing_newline {
                self.strip_final_carriage_return();
            }
            self.reindex();
        }

        debug!(section, key, removed, "remove setting");
        removed > 0
    }

    fn update_line(&mut self, idx: usize, value: &str) -> Edit {
        let Some(line) = self.lines.get_mut(idx) else {
            return Edit::Unchanged;
        };
        if line.setting().is_some_and(|setting| setting.value == value) {
            return Edit::Unchanged;
        }

        line.assign(value);
        // Activation turns a commented entry into an active one
        self.reindex();
        Edit::Updated
    }

    fn append_setting(&mut self, section: &str, key: &str, separator: &str, value: &str) {
        let entry = self.sections.get(section);
        let position = entry
            .and_then(|entry| entry.last_line)
            .map_or(0, |last| last + 1);

        let indent = match entry.and_then(|entry| entry.settings.values().max()) {
            Some(&idx) if self.config.inherit_indent => self.lines[idx].indent().to_string(),
            _ => String::new(),
        };

        let line = Line::new_setting(section, &indent, new_setting(key, separator, value), self.crlf);
        self.insert_lines(position, vec![line]);
    }

    fn create_section(&mut self, section: &str, key: &str, separator: &str, value: &str) {
        let lines = vec![
            Line::new_header(section, self.crlf),
            Line::new_setting(section, "", new_setting(key, separator, value), self.crlf),
        ];
        self.insert_lines(self.lines.len(), lines);
    }

    fn insert_lines(&mut self, position: usize, new_lines: Vec<Line>) {
        let at_end = position == self.lines.len();
        self.lines.splice(position..position, new_lines);

        // Without a final newline the last CRLF line has no terminator at all,
        // so the line that used to be last takes over the `\r`
        if at_end && self.crlf && !self.trailing_newline {
            if let Some(previous) = position.checked_sub(1).and_then(|i| self.lines.get_mut(i)) {
                previous.set_carriage_return(true);
            }
            self.strip_final_carriage_return();
        }

        self.reindex();
    }

    fn strip_final_carriage_return(&mut self) {
        if let Some(last) = self.lines.last_mut() {
            last.set_carriage_return(false);
        }
    }

    fn reindex(&mut self) {
        self.sections = SectionTable::build(&self.lines);
        self.modified = true;
    }
}

fn new_setting(key: &str, separator: &str, value: &str) -> Setting {
    Setting {
        key: key.to_string(),
        value: value.to_string(),
        separator: separator.to_string(),
    }
}
