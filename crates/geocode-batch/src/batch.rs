//! CSV batch I/O and the sequential batch driver

use std::path::{Path, PathBuf};

use mapbox_geocoding::CleanAddress;
use tracing::{error, info, warn};

use crate::error::Result;

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Read addresses from a CSV file: header row skipped, column 0 of every
/// remaining row, in file order
pub fn read_addresses(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut addresses = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(address) = record.get(0) {
            addresses.push(address.to_string());
        }
    }
    Ok(addresses)
}

/// Write normalized records to a CSV file, one row per record.
///
/// The header is the full fixed field set, so rows can never misalign
/// against it; absent values become empty cells. A row that fails to write
/// is logged and skipped rather than aborting the whole file.
pub fn write_results(records: &[CleanAddress], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CleanAddress::FIELDS)?;
    for record in records {
        let row: Vec<&str> = CleanAddress::FIELDS
            .iter()
            .map(|&field| record.get(field).unwrap_or(""))
            .collect();
        if let Err(err) = writer.write_record(&row) {
            warn!(
                address = record.address.as_deref().unwrap_or("unknown"),
                "skipping row that could not be written: {}", err
            );
        }
    }
    writer.flush()?;
    Ok(())
}

/// Geocode queries strictly sequentially, tolerating per-address failures.
///
/// A failed lookup is logged and skipped so one bad address does not abort
/// the batch; successes accumulate in input order.
pub fn run_batch<F>(queries: &[String], mut lookup: F) -> Vec<CleanAddress>
where
    F: FnMut(&str) -> mapbox_geocoding::Result<CleanAddress>,
{
    let mut results = Vec::with_capacity(queries.len());
    for query in queries {
        match lookup(query) {
            Ok(record) => results.push(record),
            Err(err) => {
                error!(query = query.as_str(), "failed to geocode address: {}", err);
            }
        }
    }
    info!(
        total = queries.len(),
        succeeded = results.len(),
        "batch geocoding finished"
    );
    results
}
