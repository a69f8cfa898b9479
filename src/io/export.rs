//! JSON catalog export.
//!
//! The JSON form carries the events plus how they were generated
//! (source, population, seed, cosmology). The schema is `domain::CatalogFile`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use snafu::ResultExt;

use crate::cosmology::Cosmology;
use crate::domain::{Catalog, CatalogFile, GenerateConfig};
use crate::error::{GwResult, IoSnafu, JsonSnafu};

pub const TOOL_NAME: &str = "gwc";

impl CatalogFile {
    pub fn from_run(config: &GenerateConfig, catalog: Catalog) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            source: Some(config.source),
            population: config.population,
            ideal: config.ideal,
            seed: config.seed,
            cosmology: config.cosmology,
            catalog,
        }
    }

    /// A file for a catalog that did not come from a generator run.
    pub fn observed(catalog: Catalog, cosmology: Cosmology, ideal: bool, seed: Option<u64>) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            source: None,
            population: None,
            ideal,
            seed,
            cosmology,
            catalog,
        }
    }
}

pub fn write_catalog_json<W: Write>(writer: W, file: &CatalogFile, origin: &str) -> GwResult<()> {
    serde_json::to_writer_pretty(writer, file).context(JsonSnafu { path: origin })
}

pub fn read_catalog_json<R: Read>(reader: R, origin: &str) -> GwResult<CatalogFile> {
    serde_json::from_reader(reader).context(JsonSnafu { path: origin })
}

pub fn save_catalog_json(path: &Path, file: &CatalogFile) -> GwResult<()> {
    let label = path.display().to_string();
    let out = File::create(path).context(IoSnafu { path: label.clone() })?;
    let mut writer = BufWriter::new(out);
    write_catalog_json(&mut writer, file, &label)?;
    writer.flush().context(IoSnafu { path: label })
}

pub fn load_catalog_json(path: &Path) -> GwResult<CatalogFile> {
    let label = path.display().to_string();
    let file = File::open(path).context(IoSnafu { path: label.clone() })?;
    read_catalog_json(BufReader::new(file), &label)
}
