//! Example of reading and editing an INI document in place

use emx_ini::{Decoder, Encoder};

fn main() -> anyhow::Result<()> {
    println!("=== INI Edit Example ===\n");

    let input = r#"# Samba configuration
[global]
  workgroup = FELLOWSHIP
  ; security = user

[print$]
  comment = Printer Drivers
"#;

    let mut doc = Decoder::new().decode(input)?;

    println!("Sections: {:?}", doc.section_names());
    println!("workgroup = {:?}", doc.get_value("global", "workgroup"));

    // One edit per policy: update, activate, append, create
    let edits = [
        ("global", "workgroup", "MORDOR"),
        ("global", "security", "ads"),
        ("print$", "path", "/var/lib/samba/printers"),
        ("homes", "browseable", "No"),
    ];

    for (section, key, value) in edits {
        let edit = doc.set_value(section, key, value);
        println!("[{}] {} = {} -> {:?}", section, key, value, edit);
    }

    let encoded = Encoder::new().encode(&doc);

    println!("\nEdited document:");
    println!("---");
    print!("{}", encoded);
    println!("---");

    // Re-applying the same edits changes nothing
    let mut reloaded = Decoder::new().decode(&encoded)?;
    for (section, key, value) in edits {
        assert!(!reloaded.set_value(section, key, value).is_change());
    }
    assert_eq!(Encoder::new().encode(&reloaded), encoded);

    println!("\nIdempotence check passed!");

    Ok(())
}
