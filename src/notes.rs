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
use std::collections::BTreeSet;

use midly::num::u7;

/// Errors raised when a note table contains rows that cannot be sampled.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note {index} has an invalid span (start: {start}, end: {end})")]
    InvalidSpan { index: usize, start: f64, end: f64 },
}

/// A single note row extracted from a MIDI file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// The instrument program the note was played with.
    program: u7,
    /// The MIDI pitch of the note.
    pitch: u7,
    /// When the note starts.
    start: f64,
    /// When the note ends.
    end: f64,
}

impl Note {
    /// Creates a new note.
    pub fn new(program: u7, pitch: u7, start: f64, end: f64) -> Note {
        Note {
            program,
            pitch,
            start,
            end,
        }
    }

    /// Gets the program of the note.
    pub fn program(&self) -> u7 {
        self.program
    }

    /// Gets the pitch of the note.
    pub fn pitch(&self) -> u7 {
        self.pitch
    }

    /// Gets the pitch class (0 = C, 11 = B) of the note.
    pub fn pitch_class(&self) -> usize {
        usize::from(self.pitch.as_int() % 12)
    }

    /// Gets the start time of the note.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Gets the end time of the note.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns true if the note sounds at some point inside the half open window
    /// [window_start, window_end).
    pub fn overlaps(&self, window_start: f64, window_end: f64) -> bool {
        self.start < window_end && self.end > window_start
    }
}

/// The notes extracted from one MIDI file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteTable {
    notes: Vec<Note>,
}

impl FromIterator<Note> for NoteTable {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        NoteTable::new(iter.into_iter().collect())
    }
}

impl NoteTable {
    /// Creates a new note table.
    pub fn new(notes: Vec<Note>) -> NoteTable {
        NoteTable { notes }
    }

    /// Checks that every note has a finite, non-negative length span.
    pub fn validate(&self) -> Result<(), NoteError> {
        match self.notes.iter().enumerate().find(|(_, note)| {
            !note.start.is_finite() || !note.end.is_finite() || note.start > note.end
        }) {
            Some((index, note)) => Err(NoteError::InvalidSpan {
                index,
                start: note.start,
                end: note.end,
            }),
            None => Ok(()),
        }
    }

    /// Gets the notes in the table.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The number of notes in the table.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if the table has no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The distinct programs in the table, in ascending order.
    pub fn programs(&self) -> BTreeSet<u7> {
        self.notes.iter().map(|note| note.program).collect()
    }

    /// Returns a copy of the table restricted to the given program.
    pub fn for_program(&self, program: u7) -> NoteTable {
        self.notes
            .iter()
            .filter(|note| note.program == program)
            .copied()
            .collect()
    }

    /// The earliest note start, or None if the table is empty.
    pub fn min_start(&self) -> Option<f64> {
        self.notes.iter().map(|note| note.start).reduce(f64::min)
    }

    /// The latest note end, or None if the table is empty.
    pub fn max_end(&self) -> Option<f64> {
        self.notes.iter().map(|note| note.end).reduce(f64::max)
    }

    /// Iterates over the notes sounding inside [window_start, window_end).
    pub fn overlapping(&self, window_start: f64, window_end: f64) -> impl Iterator<Item = &Note> {
        self.notes
            .iter()
            .filter(move |note| note.overlaps(window_start, window_end))
    }
}

/// Collects the distinct programs across all of the given tables, in ascending order.
pub fn corpus_programs(tables: &[NoteTable]) -> Vec<u7> {
    tables
        .iter()
        .flat_map(|table| table.notes.iter().map(|note| note.program))
        .collect::<BTreeSet<u7>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
pub(crate) mod test {
    use midly::num::u7;

    use super::{corpus_programs, Note, NoteError, NoteTable};

    /// Shorthand for building a note in tests.
    pub fn note(program: u8, pitch: u8, start: f64, end: f64) -> Note {
        Note::new(program.into(), pitch.into(), start, end)
    }

    #[test]
    fn test_programs_are_distinct_and_sorted() {
        let table = NoteTable::new(vec![
            note(33, 40, 0.0, 1.0),
            note(0, 60, 0.0, 1.0),
            note(33, 43, 1.0, 2.0),
        ]);

        let programs: Vec<u8> = table.programs().into_iter().map(u7::as_int).collect();
        assert_eq!(vec![0, 33], programs);
    }

    #[test]
    fn test_corpus_programs() {
        let tables = vec![
            NoteTable::new(vec![note(5, 60, 0.0, 1.0), note(1, 60, 0.0, 1.0)]),
            NoteTable::new(vec![note(1, 62, 0.0, 1.0), note(9, 36, 0.0, 1.0)]),
            NoteTable::default(),
        ];

        let programs: Vec<u8> = corpus_programs(&tables)
            .into_iter()
            .map(u7::as_int)
            .collect();
        assert_eq!(vec![1, 5, 9], programs);
        assert!(corpus_programs(&[]).is_empty());
    }

    #[test]
    fn test_for_program() {
        let table = NoteTable::new(vec![
            note(0, 60, 0.0, 1.0),
            note(1, 62, 0.5, 1.5),
            note(0, 64, 1.0, 2.0),
        ]);

        let piano = table.for_program(u7::new(0));
        assert_eq!(2, piano.len());
        assert!(piano.notes().iter().all(|n| n.program().as_int() == 0));
        assert!(table.for_program(u7::new(7)).is_empty());
    }

    #[test]
    fn test_bounds() {
        let table = NoteTable::new(vec![
            note(0, 60, 2.0, 3.0),
            note(0, 62, 0.5, 1.0),
            note(0, 64, 1.0, 4.5),
        ]);
        assert_eq!(Some(0.5), table.min_start());
        assert_eq!(Some(4.5), table.max_end());

        let empty = NoteTable::default();
        assert_eq!(None, empty.min_start());
        assert_eq!(None, empty.max_end());
    }

    #[test]
    fn test_overlapping_is_strict() {
        let table = NoteTable::new(vec![
            // Ends exactly where the window starts.
            note(0, 60, 0.0, 1.0),
            // Starts exactly where the window ends.
            note(0, 62, 2.0, 3.0),
            // Inside.
            note(0, 64, 1.2, 1.4),
            // Covers the whole window.
            note(0, 65, 0.0, 3.0),
        ]);

        let pitches: Vec<u8> = table
            .overlapping(1.0, 2.0)
            .map(|n| n.pitch().as_int())
            .collect();
        assert_eq!(vec![64, 65], pitches);
    }

    #[test]
    fn test_pitch_class() {
        assert_eq!(0, note(0, 0, 0.0, 1.0).pitch_class());
        assert_eq!(0, note(0, 60, 0.0, 1.0).pitch_class());
        assert_eq!(11, note(0, 71, 0.0, 1.0).pitch_class());
        assert_eq!(7, note(0, 127, 0.0, 1.0).pitch_class());
    }

    #[test]
    fn test_validate() {
        assert!(NoteTable::new(vec![note(0, 60, 1.0, 1.0)]).validate().is_ok());

        let reversed = NoteTable::new(vec![note(0, 60, 0.0, 1.0), note(0, 60, 2.0, 1.0)]);
        match reversed.validate() {
            Err(NoteError::InvalidSpan { index, .. }) => assert_eq!(1, index),
            Ok(()) => panic!("expected an invalid span"),
        }

        let nan = NoteTable::new(vec![note(0, 60, f64::NAN, 1.0)]);
        assert!(nan.validate().is_err());
    }
}
