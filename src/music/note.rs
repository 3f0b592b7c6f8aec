// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled notes: a natural letter plus a run of sharps or flats.
//!
//! Spellings are kept exactly as written, so `C♯♯` and `D` are different
//! notes here even though they sound the same.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};

/// Sharp glyph
pub const SHARP: char = '♯';

/// Flat glyph
pub const FLAT: char = '♭';

/// The seven natural note letters, in diatonic (alphabetical) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NaturalNote {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NaturalNote {
    /// All letters in diatonic order starting at A
    pub const ALL: [NaturalNote; 7] = [
        NaturalNote::A,
        NaturalNote::B,
        NaturalNote::C,
        NaturalNote::D,
        NaturalNote::E,
        NaturalNote::F,
        NaturalNote::G,
    ];

    /// Position in the letter cycle (A = 0 ... G = 6)
    pub fn diatonic_index(self) -> u8 {
        match self {
            NaturalNote::A => 0,
            NaturalNote::B => 1,
            NaturalNote::C => 2,
            NaturalNote::D => 3,
            NaturalNote::E => 4,
            NaturalNote::F => 5,
            NaturalNote::G => 6,
        }
    }

    /// Letter at a diatonic index, wrapping modulo 7
    pub fn from_diatonic_index(index: usize) -> Self {
        NaturalNote::ALL[index % 7]
    }

    /// Semitones above C (0-11)
    pub fn chromatic_offset(self) -> u8 {
        match self {
            NaturalNote::C => 0,
            NaturalNote::D => 2,
            NaturalNote::E => 4,
            NaturalNote::F => 5,
            NaturalNote::G => 7,
            NaturalNote::A => 9,
            NaturalNote::B => 11,
        }
    }

    /// Step forward through the letter cycle
    pub fn step(self, steps: usize) -> Self {
        NaturalNote::from_diatonic_index(self.diatonic_index() as usize + steps)
    }

    /// Match a single character, ignoring case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(NaturalNote::A),
            'B' => Some(NaturalNote::B),
            'C' => Some(NaturalNote::C),
            'D' => Some(NaturalNote::D),
            'E' => Some(NaturalNote::E),
            'F' => Some(NaturalNote::F),
            'G' => Some(NaturalNote::G),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NaturalNote::A => 'A',
            NaturalNote::B => 'B',
            NaturalNote::C => 'C',
            NaturalNote::D => 'D',
            NaturalNote::E => 'E',
            NaturalNote::F => 'F',
            NaturalNote::G => 'G',
        }
    }
}

impl fmt::Display for NaturalNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Find the first natural letter in a spelling, scanning left to right.
///
/// Case is ignored and anything that isn't a letter A-G is skipped, so
/// `"g7"` gives `G` and `"K"` gives `None`.
pub fn extract_natural_letter(spelling: &str) -> Option<NaturalNote> {
    spelling.chars().find_map(NaturalNote::from_char)
}

/// Sharp and flat glyphs counted independently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccidentalCount {
    pub sharps: usize,
    pub flats: usize,
}

impl AccidentalCount {
    /// Total glyphs of either kind
    pub fn total(&self) -> usize {
        self.sharps + self.flats
    }

    /// Sharps minus flats
    pub fn net(&self) -> i32 {
        self.sharps as i32 - self.flats as i32
    }
}

/// Count accidental glyphs in a spelling
pub fn count_accidentals(spelling: &str) -> AccidentalCount {
    spelling.chars().fold(AccidentalCount::default(), |mut count, c| {
        match c {
            SHARP => count.sharps += 1,
            FLAT => count.flats += 1,
            _ => {}
        }
        count
    })
}

/// Count accidental glyphs across a sequence of spellings
pub fn count_accidentals_in<I, S>(spellings: I) -> AccidentalCount
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    spellings
        .into_iter()
        .map(|s| count_accidentals(s.as_ref()))
        .fold(AccidentalCount::default(), |acc, c| AccidentalCount {
            sharps: acc.sharps + c.sharps,
            flats: acc.flats + c.flats,
        })
}

/// Convert ASCII accidentals to glyphs (`F#` -> `F♯`, `Bb` -> `B♭`).
///
/// A `b` only becomes a flat once a note letter has been seen, so the
/// letter B itself survives. Text already using glyphs passes through.
pub fn normalize_accidentals(spelling: &str) -> String {
    let mut seen_letter = false;
    spelling
        .chars()
        .map(|c| match c {
            '#' => SHARP,
            'b' if seen_letter => FLAT,
            _ => {
                if NaturalNote::from_char(c).is_some() {
                    seen_letter = true;
                }
                c
            }
        })
        .collect()
}

/// A natural letter with a signed accidental count.
///
/// Positive counts render as sharps, negative as flats. The count is
/// unbounded, so double sharps and flats are ordinary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpelledNote {
    natural: NaturalNote,
    accidentals: i32,
}

impl SpelledNote {
    pub const fn new(natural: NaturalNote, accidentals: i32) -> Self {
        Self {
            natural,
            accidentals,
        }
    }

    /// The letter with no accidentals
    pub const fn natural(natural: NaturalNote) -> Self {
        Self::new(natural, 0)
    }

    /// Parse a spelling.
    ///
    /// The letter comes from [`extract_natural_letter`] and every sharp or
    /// flat glyph in the text adjusts the count.
    pub fn parse(spelling: &str) -> Result<Self> {
        let natural = extract_natural_letter(spelling)
            .ok_or_else(|| TheoryError::InvalidNoteToken(spelling.to_string()))?;
        Ok(Self::new(natural, count_accidentals(spelling).net()))
    }

    pub fn letter(&self) -> NaturalNote {
        self.natural
    }

    /// Signed accidental count (sharps positive)
    pub fn accidentals(&self) -> i32 {
        self.accidentals
    }

    pub fn is_natural(&self) -> bool {
        self.accidentals == 0
    }

    pub fn is_sharp(&self) -> bool {
        self.accidentals > 0
    }

    pub fn is_flat(&self) -> bool {
        self.accidentals < 0
    }

    /// Glyph counts as they appear in the rendered spelling
    pub fn accidental_count(&self) -> AccidentalCount {
        AccidentalCount {
            sharps: self.accidentals.max(0) as usize,
            flats: (-self.accidentals).max(0) as usize,
        }
    }

    /// Pitch class (0-11, C = 0), ignoring spelling
    pub fn pitch_class(&self) -> u8 {
        (self.natural.chromatic_offset() as i32 + self.accidentals).rem_euclid(12) as u8
    }

    /// Same pitch class, any spelling
    pub fn is_enharmonic(&self, other: &SpelledNote) -> bool {
        self.pitch_class() == other.pitch_class()
    }
}

impl From<NaturalNote> for SpelledNote {
    fn from(natural: NaturalNote) -> Self {
        SpelledNote::natural(natural)
    }
}

impl fmt::Display for SpelledNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.natural)?;
        let glyph = if self.accidentals > 0 { SHARP } else { FLAT };
        for _ in 0..self.accidentals.unsigned_abs() {
            write!(f, "{}", glyph)?;
        }
        Ok(())
    }
}

impl FromStr for SpelledNote {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        SpelledNote::parse(s)
    }
}

impl TryFrom<String> for SpelledNote {
    type Error = TheoryError;

    fn try_from(s: String) -> Result<Self> {
        SpelledNote::parse(&s)
    }
}

impl From<SpelledNote> for String {
    fn from(note: SpelledNote) -> Self {
        note.to_string()
    }
}
