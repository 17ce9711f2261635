// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::path::Path;

use tracing::{debug, info};

use crate::notes::NoteTable;
use crate::util::filename_display;

pub use self::error::ConfigError;
pub use self::sampler::{
    SamplerConfig, DEFAULT_BATCH_SIZE, DEFAULT_SEQ_LEN, DEFAULT_TIME_FRACTION,
};

mod corpus;
mod error;
mod sampler;
mod table;

/// Loads a note table from a YAML, TOML or JSON file.
pub fn load_table(path: &Path) -> Result<NoteTable, ConfigError> {
    let table = table::Table::deserialize(path)?.to_note_table(filename_display(path))?;
    debug!(
        file = filename_display(path),
        notes = table.len(),
        programs = table.programs().len(),
        "Loaded note table"
    );
    Ok(table)
}

/// A corpus loaded from disk.
#[derive(Debug)]
pub struct LoadedCorpus {
    /// The sampler settings from the corpus file.
    pub config: SamplerConfig,
    /// The note tables, in the order the corpus file lists them.
    pub tables: Vec<NoteTable>,
    /// The table paths as written in the corpus file. Index matches tables.
    pub names: Vec<String>,
}

/// Loads a corpus file along with every note table it references. Table paths are resolved
/// relative to the directory containing the corpus file.
pub fn load_corpus(path: &Path) -> Result<LoadedCorpus, ConfigError> {
    let corpus = corpus::Corpus::deserialize(path)?;
    let config = corpus.sampler_config()?;

    let base = path.parent().unwrap_or(Path::new("."));
    let tables = corpus
        .tables()
        .iter()
        .map(|table| load_table(&base.join(table)))
        .collect::<Result<Vec<NoteTable>, ConfigError>>()?;

    info!(
        file = filename_display(path),
        tables = tables.len(),
        batch_size = config.batch_size(),
        seq_len = config.seq_len(),
        time_fraction = config.time_fraction(),
        "Loaded corpus"
    );
    Ok(LoadedCorpus {
        config,
        tables,
        names: corpus.tables().to_vec(),
    })
}
