//! Editing INI files in place

use emx_ini::{Decoder, Document, Edit, Encoder};
use tempfile::TempDir;

const EMPTY_VALUES: &str = "[section1]
foo=
#bar=
#xyzzy['thing1']['thing2']='xyzzyvalue'
";

fn load(input: &str) -> Document {
    Decoder::new().decode(input).unwrap()
}

#[test]
fn test_empty_values_start_unset() {
    let doc = load(EMPTY_VALUES);

    assert_eq!(doc.get_value("section1", "far"), None);
    assert_eq!(doc.get_value("section1", "bar"), None);
    assert_eq!(doc.get_value("section1", "xyzzy['thing1']['thing2']"), None);
    assert_eq!(doc.get_value("section1", "foo"), Some(""));
}

#[test]
fn test_update_uncommented_value() {
    for separator in [Some(" = "), None] {
        let mut doc = load(EMPTY_VALUES);
        let edit = match separator {
            Some(separator) => doc.set_value_with_separator("section1", "foo", separator, "foovalue"),
            None => doc.set_value("section1", "foo", "foovalue"),
        };

        assert_eq!(edit, Edit::Updated);
        assert_eq!(doc.get_value("section1", "foo"), Some("foovalue"));
        assert_eq!(doc.lines()[1].raw(), "foo=foovalue");
    }
}

#[test]
fn test_update_commented_values() {
    for key in ["bar", "xyzzy['thing1']['thing2']"] {
        for separator in [Some(" = "), None] {
            let mut doc = load(EMPTY_VALUES);
            let edit = match separator {
                Some(separator) => doc.set_value_with_separator("section1", key, separator, "v"),
                None => doc.set_value("section1", key, "v"),
            };

            assert_eq!(edit, Edit::Activated);
            assert_eq!(doc.get_value("section1", key), Some("v"));
            assert_eq!(doc.lines().len(), 4, "{key}");
        }
    }
}

#[test]
fn test_activation_reuses_original_separator() {
    let mut doc = load(EMPTY_VALUES);

    doc.set_value_with_separator("section1", "bar", " = ", "x");

    assert_eq!(
        Encoder::new().encode(&doc),
        "[section1]\nfoo=\nbar=x\n#xyzzy['thing1']['thing2']='xyzzyvalue'\n"
    );
}

#[test]
fn test_add_new_value() {
    for separator in [Some(" = "), None] {
        let mut doc = load(EMPTY_VALUES);
        let edit = match separator {
            Some(separator) => doc.set_value_with_separator("section1", "baz", separator, "bazvalue"),
            None => doc.set_value("section1", "baz", "bazvalue"),
        };

        assert_eq!(edit, Edit::Appended);
        assert_eq!(doc.get_value("section1", "baz"), Some("bazvalue"));
        assert_eq!(doc.lines()[4].raw(), "baz = bazvalue");
    }
}

#[test]
fn test_new_section_adds_two_lines_at_end() {
    let input = include_str!("fixtures/sample.ini");
    let mut doc = load(input);
    let line_count = doc.lines().len();
    let section_count = doc.section_names().len();

    assert_eq!(doc.set_value("section3", "key", "value"), Edit::SectionCreated);

    assert_eq!(doc.lines().len(), line_count + 2);
    assert_eq!(doc.section_names().len(), section_count + 1);
    assert_eq!(
        Encoder::new().encode(&doc),
        format!("{input}[section3]\nkey = value\n")
    );
}

#[test]
fn test_edit_leaves_other_lines_untouched() {
    let input = include_str!("fixtures/smb.ini");
    let mut doc = load(input);

    doc.set_value("printers", "browseable", "Yes");

    let before: Vec<&str> = input.lines().collect();
    let output = Encoder::new().encode(&doc);
    let after: Vec<&str> = output.lines().collect();
    assert_eq!(before.len(), after.len());

    let changed: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(after[changed[0]], "  browseable = Yes");
}

#[test]
fn test_append_into_middle_section_with_indent() {
    let mut doc = load(include_str!("fixtures/gitconfig.ini"));

    assert_eq!(doc.set_value("branch \"main\"", "rebase", "true"), Edit::Appended);

    let output = Encoder::new().encode(&doc);
    assert!(output.starts_with(
        "[branch \"main\"]\n        remote = origin\n        merge = refs/heads/main\n\n        rebase = true\n[alias]\n"
    ));
}

#[test]
fn test_reapplying_same_value_is_noop() {
    let input = include_str!("fixtures/sample.ini");
    let mut doc = load(input);

    doc.set_value("section2", "zot", "other value");
    let once = Encoder::new().encode(&doc);

    let mut doc = load(&once);
    assert_eq!(doc.set_value("section2", "zot", "other value"), Edit::Unchanged);
    assert!(!doc.is_modified());
    assert_eq!(Encoder::new().encode(&doc), once);
}

#[test]
fn test_file_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("my.cnf");
    std::fs::write(&path, "[mysqld]\n# tuning\nmax_connections = 100\n").unwrap();

    let mut doc = Decoder::new().decode_file(&path).unwrap();
    doc.set_value("mysqld", "max_connections", "250");
    doc.set_value("client", "port", "3306");
    Encoder::new().encode_to_file(&doc, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "[mysqld]\n# tuning\nmax_connections = 250\n[client]\nport = 3306\n"
    );

    let reloaded = Decoder::new().decode_file(&path).unwrap();
    assert_eq!(reloaded.get_value("mysqld", "max_connections"), Some("250"));
    assert_eq!(reloaded.get_value("client", "port"), Some("3306"));
}

#[test]
fn test_decode_file_reports_malformed_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.ini");
    std::fs::write(&path, "[ok]\n[broken\n").unwrap();

    let err = Decoder::new().decode_file(&path).unwrap_err();

    assert!(err.to_string().contains("Failed to parse"));
    let parse_error = err.downcast_ref::<emx_ini::ParseError>().unwrap();
    assert!(matches!(
        parse_error,
        emx_ini::ParseError::MalformedSectionHeader { line_number: 2, .. }
    ));
}
