//! Table exporters for combined invoice lines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use incomb_core::{InvoiceLine, COLUMNS};

/// Output table format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Excel workbook
    Xlsx,
    /// JSON array of objects
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
        }
    }

    /// Parse a format name from configuration.
    pub fn parse_name(name: &str) -> anyhow::Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("Unknown output format: {}", name))
    }
}

/// Output path for a format inside `dir`.
pub fn output_path(dir: &Path, base_name: &str, format: ExportFormat) -> PathBuf {
    dir.join(format!("{}.{}", base_name, format.extension()))
}

/// Write records in the given format to `path`.
pub fn export(format: ExportFormat, path: &Path, records: &[InvoiceLine]) -> anyhow::Result<()> {
    match format {
        ExportFormat::Csv => write_csv(BufWriter::new(File::create(path)?), records)?,
        ExportFormat::Xlsx => write_xlsx(path, records)?,
        ExportFormat::Json => write_json(BufWriter::new(File::create(path)?), records)?,
    }

    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Write records as CSV with the fixed header.
pub fn write_csv<W: Write>(writer: W, records: &[InvoiceLine]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(record.as_row())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write records as a single-sheet workbook with the fixed header.
pub fn write_xlsx(path: &Path, records: &[InvoiceLine]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = u32::try_from(idx + 1)?;
        for (col, value) in record.as_row().iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut writer: W, records: &[InvoiceLine]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
