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

use config::{Config, File};
use midly::num::u7;
use serde::Deserialize;

use super::error::ConfigError;
use crate::notes::{Note, NoteTable};

/// A file representation of the notes extracted from one MIDI file.
#[derive(Deserialize)]
pub(super) struct Table {
    /// The notes in the table.
    #[serde(default)]
    notes: Vec<NoteRow>,
}

/// A file representation of a single note.
#[derive(Deserialize)]
struct NoteRow {
    program: u8,
    pitch: u8,
    start: f64,
    end: f64,
}

impl NoteRow {
    fn to_note(&self, file: &str) -> Result<Note, ConfigError> {
        Ok(Note::new(
            midi_number(file, "program", self.program)?,
            midi_number(file, "pitch", self.pitch)?,
            self.start,
            self.end,
        ))
    }
}

fn midi_number(file: &str, field: &'static str, value: u8) -> Result<u7, ConfigError> {
    u7::try_from(value).ok_or_else(|| ConfigError::OutOfRange {
        file: file.to_string(),
        field,
        value,
    })
}

impl Table {
    /// Parses a note table from a file. The format is chosen by the file extension.
    pub(super) fn deserialize(path: &Path) -> Result<Table, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<Table>()?)
    }

    /// Converts this table representation into a validated note table.
    pub(super) fn to_note_table(&self, file: &str) -> Result<NoteTable, ConfigError> {
        let table = self
            .notes
            .iter()
            .map(|row| row.to_note(file))
            .collect::<Result<NoteTable, ConfigError>>()?;
        table.validate().map_err(|source| ConfigError::Notes {
            file: file.to_string(),
            source,
        })?;
        Ok(table)
    }
}

#[cfg(test)]
mod test {
    use config::{Config, File, FileFormat};

    use crate::config::ConfigError;

    use super::Table;

    fn parse(yaml: &str) -> Table {
        Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_table_deserialize() {
        let table = parse(
            r#"
            notes:
              - { program: 0, pitch: 60, start: 0.0, end: 0.5 }
              - { program: 33, pitch: 40, start: 0.25, end: 1 }
            "#,
        )
        .to_note_table("song.yaml")
        .unwrap();

        assert_eq!(2, table.len());
        let bass = table.notes()[1];
        assert_eq!(33, bass.program().as_int());
        assert_eq!(40, bass.pitch().as_int());
        assert_eq!(0.25, bass.start());
        assert_eq!(1.0, bass.end());
    }

    #[test]
    fn test_empty_table() {
        let table = parse("notes: []").to_note_table("empty.yaml").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_pitch_out_of_range() {
        let result = parse(
            r#"
            notes:
              - { program: 0, pitch: 128, start: 0.0, end: 0.5 }
            "#,
        )
        .to_note_table("song.yaml");

        match result {
            Err(ConfigError::OutOfRange { field, value, .. }) => {
                assert_eq!("pitch", field);
                assert_eq!(128, value);
            }
            other => panic!("expected an out of range error, got {:?}", other),
        }
    }

    #[test]
    fn test_reversed_span() {
        let result = parse(
            r#"
            notes:
              - { program: 0, pitch: 60, start: 2.0, end: 1.0 }
            "#,
        )
        .to_note_table("song.yaml");

        assert!(matches!(result, Err(ConfigError::Notes { .. })));
    }
}
