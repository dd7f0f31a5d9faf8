use std::fs::{File, read_to_string};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;
use serde::de::DeserializeOwned;

use mendel_genotype::EditorConfig;

/// `--config` if given, the defaults otherwise.
pub fn load_config(matches: &ArgMatches) -> Result<EditorConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => EditorConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(EditorConfig::default()),
    }
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let json = read_to_string(path).with_context(|| format!("Failed to read: {}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse JSON in: {}", path))
}

/// Pretty JSON to `--output`, or stdout.
pub fn write_json<T: Serialize>(value: &T, matches: &ArgMatches) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;

    match matches.get_one::<String>("output") {
        Some(p) => {
            let mut file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
