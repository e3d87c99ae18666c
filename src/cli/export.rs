//! CLI command for ledger export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_json, export_movements_csv, export_yaml};
use crate::models::Identity;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Full ledger, machine-readable
    Json,
    /// Full ledger, human-readable
    Yaml,
    /// Expenses and incomes only
    Csv,
}

/// Export the caller's ledger to a file, or to stdout when no path is given
pub fn handle_export(
    storage: &Storage,
    identity: &Identity,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    match &output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, identity, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;
            println!("Exported {:?} to: {}", format, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, identity, format, &mut writer)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    identity: &Identity,
    format: ExportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Json => export_json(storage, identity, writer),
        ExportFormat::Yaml => export_yaml(storage, identity, writer),
        ExportFormat::Csv => export_movements_csv(storage, identity, writer),
    }
}
