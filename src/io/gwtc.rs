//! Observed-event CSV input.
//!
//! Expected columns (Mpc): `luminosity_distance`, `luminosity_distance_lower`,
//! `luminosity_distance_upper`. Other columns are ignored; `#` lines are
//! comments.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use snafu::ResultExt;

use crate::error::{CsvSnafu, GwResult, IoSnafu};
use crate::generate::GwtcRecord;

pub fn read_gwtc_records<R: Read>(reader: R, origin: &str) -> GwResult<Vec<GwtcRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);
    reader
        .deserialize::<GwtcRecord>()
        .collect::<Result<Vec<_>, csv::Error>>()
        .context(CsvSnafu { path: origin })
}

pub fn load_gwtc_records(path: &Path) -> GwResult<Vec<GwtcRecord>> {
    let label = path.display().to_string();
    let file = File::open(path).context(IoSnafu { path: label.clone() })?;
    let records = read_gwtc_records(file, &label)?;
    debug!("read {} observed events from {label}", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_columns_and_ignores_extras() {
        let text = "\
# GWTC-1 confident events
name,luminosity_distance,luminosity_distance_lower,luminosity_distance_upper
GW150914,440,-170,150
GW170817,40,-15,7
";
        let records = read_gwtc_records(text.as_bytes(), "memory").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].luminosity_distance, 40.0);
        assert_eq!(records[0].luminosity_distance_lower, -170.0);
    }

    #[test]
    fn non_numeric_distance_fails() {
        let text = "luminosity_distance,luminosity_distance_lower,luminosity_distance_upper\nfar,-1,1\n";
        assert!(read_gwtc_records(text.as_bytes(), "memory").is_err());
    }
}
