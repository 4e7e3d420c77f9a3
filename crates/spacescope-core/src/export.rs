/// Export of the current listing to CSV or JSON.
use crate::model::{Entry, Listing};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// One exported row.
#[derive(Debug, Serialize)]
struct Record<'a> {
    name: &'a str,
    path: String,
    kind: &'static str,
    size: &'a str,
    size_bytes: u64,
    modified: String,
}

impl<'a> From<&'a Entry> for Record<'a> {
    fn from(e: &'a Entry) -> Self {
        Self {
            name: e.name.as_str(),
            path: e.path.to_string_lossy().into_owned(),
            kind: e.kind.as_str(),
            size: &e.size,
            size_bytes: e.size_bytes,
            modified: e
                .last_modified
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Write the entries of `listing` to any writer.
pub fn write_listing<W: Write>(
    listing: &Listing,
    format: ExportFormat,
    mut writer: W,
) -> Result<()> {
    let records: Vec<Record<'_>> = listing.iter().map(Record::from).collect();
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut writer);
            for record in &records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &records)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Export `listing` to `path`; the format follows the extension.
pub fn export_listing(listing: &Listing, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path);
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_listing(listing, format, BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Exported {} entries to {}", listing.len(), path.display());
    Ok(format)
}
