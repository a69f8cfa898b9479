//! Plain-text catalog files.
//!
//! Layout:
//!
//! ```text
//! # optional free-form info line
//! # units: none, Gpc, Gpc
//! redshift,luminosity_distance,error
//! 0.1,0.4634,0.0231
//! ```
//!
//! Rows are written in ascending redshift order. Lines starting with `#` are
//! skipped on load.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use snafu::ResultExt;

use crate::domain::{Catalog, Event};
use crate::error::{CsvSnafu, GwResult, IoSnafu};

pub const UNITS_LINE: &str = "# units: none, Gpc, Gpc";
pub const HEADER_LINE: &str = "redshift,luminosity_distance,error";

/// Write `catalog` to any writer. An info line without a leading `#` gets one
/// so the file still loads.
pub fn write_catalog<W: Write>(mut writer: W, catalog: &Catalog, info: Option<&str>) -> io::Result<()> {
    if let Some(info) = info.map(str::trim).filter(|s| !s.is_empty()) {
        if info.starts_with('#') {
            writeln!(writer, "{info}")?;
        } else {
            writeln!(writer, "# {info}")?;
        }
    }
    writeln!(writer, "{UNITS_LINE}")?;
    writeln!(writer, "{HEADER_LINE}")?;
    for e in catalog.sorted_by_redshift() {
        writeln!(writer, "{},{},{}", e.redshift, e.distance, e.error)?;
    }
    writer.flush()
}

/// Save to `path`, or to stdout when `path` is `None`.
pub fn save_catalog(path: Option<&Path>, catalog: &Catalog, info: Option<&str>) -> GwResult<()> {
    match path {
        Some(path) => {
            let label = path.display().to_string();
            let file = File::create(path).context(IoSnafu { path: label.clone() })?;
            write_catalog(BufWriter::new(file), catalog, info).context(IoSnafu { path: label })?;
            debug!("wrote {} events to {}", catalog.len(), path.display());
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            write_catalog(stdout.lock(), catalog, info).context(IoSnafu { path: "<stdout>" })
        }
    }
}

/// Parse a catalog from any reader. `origin` names the input in errors.
pub fn read_catalog<R: Read>(reader: R, origin: &str) -> GwResult<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);
    let events = reader
        .deserialize::<Event>()
        .collect::<Result<Vec<Event>, csv::Error>>()
        .context(CsvSnafu { path: origin })?;
    Ok(Catalog::new(events))
}

/// Load a catalog file, labelled with its file stem.
pub fn load_catalog(path: &Path) -> GwResult<Catalog> {
    let label = path.display().to_string();
    let file = File::open(path).context(IoSnafu { path: label.clone() })?;
    let catalog = read_catalog(file, &label)?;
    debug!("loaded {} events from {label}", catalog.len());
    Ok(match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => catalog.with_label(stem),
        None => catalog,
    })
}
