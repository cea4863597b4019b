//! CSV output in the Letterboxd import format.

use crate::error::{Result, ScrapeError};
use serde::Serialize;
use shared::{ListRecord, RatingRecord};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A record kind with a fixed column order
pub trait ExportRecord: Serialize {
    const FIELDS: &'static [&'static str];
}

impl ExportRecord for RatingRecord {
    const FIELDS: &'static [&'static str] = &RatingRecord::FIELDS;
}

impl ExportRecord for ListRecord {
    const FIELDS: &'static [&'static str] = &ListRecord::FIELDS;
}

/// Write a header row and then every record. Stops at the first error.
///
/// Returns the number of records written.
pub fn write_csv<W, R, I>(out: W, records: I) -> Result<usize>
where
    W: Write,
    R: ExportRecord,
    I: IntoIterator<Item = Result<R>>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(R::FIELDS)?;

    let mut written = 0;
    for record in records {
        writer.serialize(record?)?;
        written += 1;
    }
    writer.flush()?;

    Ok(written)
}

/// Write records to `path`, replacing it only if every record made it.
///
/// Output goes to a sibling `.part` file that is renamed on success and
/// removed on failure.
pub fn export_to_file<R, I>(path: &Path, records: I) -> Result<usize>
where
    R: ExportRecord,
    I: IntoIterator<Item = Result<R>>,
{
    let partial = partial_path(path);
    debug!(path = %partial.display(), "Writing export");

    let result = File::create(&partial)
        .map_err(ScrapeError::from)
        .and_then(|file| write_csv(std::io::BufWriter::new(file), records));

    match result {
        Ok(written) => {
            std::fs::rename(&partial, path)?;
            Ok(written)
        }
        Err(e) => {
            if let Err(cleanup) = std::fs::remove_file(&partial) {
                warn!(path = %partial.display(), error = %cleanup, "Failed to remove partial export");
            }
            Err(e)
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
