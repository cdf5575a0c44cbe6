//! emx-ini CLI
//!
//! Query and edit INI files in place (similar to `git config`).

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use emx_ini::{Decoder, Document, Edit, Encoder};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "emx-ini")]
#[command(author = "nzinfo <li.monan@gmail.com>")]
#[command(version)]
#[command(about = "Format-preserving INI file tool")]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List section names (the global section prints as "")
    Sections {
        /// INI file to read
        file: PathBuf,
    },

    /// Print one setting's value
    Get {
        /// INI file to read
        file: PathBuf,
        /// Section name ("" for the global section)
        section: String,
        /// Setting key
        key: String,
    },

    /// Print every active setting of a section
    Show {
        /// INI file to read
        file: PathBuf,
        /// Section name ("" for the global section)
        section: String,
    },

    /// Assign a value, updating, uncommenting or appending as needed
    Set {
        /// INI file to edit (created if missing)
        file: PathBuf,
        /// Section name ("" for the global section)
        section: String,
        /// Setting key
        key: String,
        /// New value
        value: String,

        /// Separator for newly written settings (default: " = ")
        #[arg(short, long)]
        separator: Option<String>,

        /// Print the result instead of writing the file
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Delete a setting
    Remove {
        /// INI file to edit
        file: PathBuf,
        /// Section name ("" for the global section)
        section: String,
        /// Setting key
        key: String,

        /// Print the result instead of writing the file
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Sections { file } => {
            list_sections(&file)?;
        }
        Commands::Get { file, section, key } => {
            get_value(&file, &section, &key)?;
        }
        Commands::Show { file, section } => {
            show_section(&file, &section)?;
        }
        Commands::Set { file, section, key, value, separator, dry_run } => {
            set_value(&file, &section, &key, &value, separator.as_deref(), dry_run)?;
        }
        Commands::Remove { file, section, key, dry_run } => {
            remove_setting(&file, &section, &key, dry_run)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step from `warn`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load(file: &Path) -> Result<Document> {
    Decoder::new().decode_file(file)
}

fn load_or_empty(file: &Path) -> Result<Document> {
    if file.exists() {
        load(file)
    } else {
        info!("{} does not exist, starting empty", file.display());
        Ok(Document::new())
    }
}

fn save(document: &Document, file: &Path, dry_run: bool) -> Result<()> {
    let encoder = Encoder::new();

    if dry_run {
        print!("{}", encoder.encode(document));
    } else if document.is_modified() {
        encoder.encode_to_file(document, file)?;
        info!("Wrote: {}", file.display());
    } else {
        info!("No changes: {}", file.display());
    }

    Ok(())
}

fn list_sections(file: &Path) -> Result<()> {
    let document = load(file)?;

    for name in document.section_names() {
        if name.is_empty() {
            println!("\"\"");
        } else {
            println!("{}", name);
        }
    }

    Ok(())
}

fn get_value(file: &Path, section: &str, key: &str) -> Result<()> {
    let document = load(file)?;

    match document.get_value(section, key) {
        Some(value) => println!("{}", value),
        None => bail!("No setting '{}' in section '{}'", key, section),
    }

    Ok(())
}

fn show_section(file: &Path, section: &str) -> Result<()> {
    let document = load(file)?;

    for (key, value) in document.get_settings(section) {
        println!("{} = {}", key, value);
    }

    Ok(())
}

fn set_value(
    file: &Path,
    section: &str,
    key: &str,
    value: &str,
    separator: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let mut document = load_or_empty(file)?;

    let edit = match separator {
        Some(separator) => document.set_value_with_separator(section, key, separator, value),
        None => document.set_value(section, key, value),
    };

    match edit {
        Edit::Unchanged => info!("[{}] {} already set", section, key),
        edit => info!("[{}] {}: {:?}", section, key, edit),
    }

    save(&document, file, dry_run)
}

fn remove_setting(file: &Path, section: &str, key: &str, dry_run: bool) -> Result<()> {
    let mut document = load(file)?;

    if !document.remove_setting(section, key) {
        info!("[{}] {} not present", section, key);
    }

    save(&document, file, dry_run)
}
