//! YAML export
//!
//! Same document as the JSON export, prefixed with a comment header.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Identity;
use crate::storage::Storage;

use super::json::LedgerExport;

pub fn export_yaml<W: Write>(
    storage: &Storage,
    identity: &Identity,
    writer: &mut W,
) -> LedgerResult<()> {
    let export = LedgerExport::for_identity(storage, identity)?;
    let to_export_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# fintrack ledger export").map_err(to_export_err)?;
    writeln!(writer, "# Owner: {}", export.owner.email).map_err(to_export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(to_export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(to_export_err)?;
    writeln!(writer).map_err(to_export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))
}
