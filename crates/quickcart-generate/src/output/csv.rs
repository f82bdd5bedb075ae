use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use quickcart_core::write_table;

use crate::errors::GenerationError;
use crate::model::TableReport;

/// Write a table as CSV and describe it for the generation report.
pub fn write_table_csv<T: Serialize>(
    path: &Path,
    table: &str,
    rows: &[T],
) -> Result<TableReport, GenerationError> {
    let bytes_written = write_table(path, rows)?;
    Ok(TableReport {
        table: table.to_string(),
        path: path.to_path_buf(),
        rows_generated: rows.len() as u64,
        bytes_written,
        fingerprint: hash_file(path)?,
    })
}

/// Hex SHA-256 of a file's contents.
pub fn hash_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}
