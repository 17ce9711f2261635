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
use crate::notes::Note;

/// The number of pitch classes in the chromatic scale.
pub const PITCH_CLASSES: usize = 12;

/// Converts a set of notes into a pitch class indicator. Each pitch class that at least one
/// of the notes belongs to is set to 1.0, everything else is 0.0.
pub fn pitch_class_indicator<'a, I>(notes: I) -> [f32; PITCH_CLASSES]
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut indicator = [0.0; PITCH_CLASSES];
    for note in notes {
        indicator[note.pitch_class()] = 1.0;
    }
    indicator
}
