use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// Tables written by the generator and read by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTable {
    Customers,
    Products,
    Sales,
    Deliveries,
}

impl RawTable {
    pub const ALL: [RawTable; 4] = [
        RawTable::Customers,
        RawTable::Products,
        RawTable::Sales,
        RawTable::Deliveries,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Sales => "sales",
            Self::Deliveries => "deliveries",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Customers => "customer_data.csv",
            Self::Products => "product_data.csv",
            Self::Sales => "sales_data.csv",
            Self::Deliveries => "delivery_data.csv",
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// Tables written into the processed directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessedTable {
    Consolidated,
    Customers,
    Products,
    Sales,
    Deliveries,
    Master,
}

impl ProcessedTable {
    pub fn name(self) -> &'static str {
        match self {
            Self::Consolidated => "consolidated",
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Sales => "sales",
            Self::Deliveries => "deliveries",
            Self::Master => "master",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Consolidated => "blinkit_consolidated.csv",
            Self::Customers => "customers_clean.csv",
            Self::Products => "products_clean.csv",
            Self::Sales => "sales_clean.csv",
            Self::Deliveries => "deliveries_clean.csv",
            Self::Master => "master_dataset.csv",
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// Rows decoded from a CSV file plus the count of rows that did not decode.
#[derive(Debug, Clone)]
pub struct TableRead<T> {
    pub rows: Vec<T>,
    pub malformed: u64,
}

/// Read a headed CSV file into typed rows.
///
/// Rows that fail to decode are skipped and counted rather than failing the
/// read; a missing file is reported as [`Error::MissingInput`].
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<TableRead<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    let mut malformed = 0_u64;
    for (index, record) in reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) if is_row_error(&err) => {
                malformed += 1;
                debug!(path = %path.display(), row = index, error = %err, "skipping malformed row");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(TableRead { rows, malformed })
}

fn is_row_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Utf8 { .. }
    )
}

/// Write rows as a headed CSV file, creating the parent directory if needed.
///
/// Returns the number of bytes written.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<u64> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(counting);

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    let mut counting = writer.into_inner().map_err(|err| err.into_error())?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
