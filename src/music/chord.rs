// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord spelling.
//!
//! Chord shapes are interval templates just like scales, so chord tones
//! are spelled from the root the same way scale degrees are spelled from
//! the tonic. Diatonic chords are found by stacking thirds inside a scale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::note::SpelledNote;
use super::scale::{compose_scale, Scale};
use crate::error::{Result, TheoryError};

/// Chord shapes with their interval templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordShape {
    // Triads
    Major,
    Minor,
    Diminished,
    Augmented,

    // Tetrads
    Major7,
    Minor7,
    Dominant7,
    HalfDiminished7, // m7♭5
    Diminished7,
}

impl ChordShape {
    pub const ALL: [ChordShape; 9] = [
        ChordShape::Major,
        ChordShape::Minor,
        ChordShape::Diminished,
        ChordShape::Augmented,
        ChordShape::Major7,
        ChordShape::Minor7,
        ChordShape::Dominant7,
        ChordShape::HalfDiminished7,
        ChordShape::Diminished7,
    ];

    /// Named intervals from the root, in stacking order
    pub fn intervals(self) -> &'static [&'static str] {
        match self {
            ChordShape::Major => &["1", "M3", "P5"],
            ChordShape::Minor => &["1", "m3", "P5"],
            ChordShape::Diminished => &["1", "m3", "dim5"],
            ChordShape::Augmented => &["1", "M3", "aug5"],
            ChordShape::Major7 => &["1", "M3", "P5", "M7"],
            ChordShape::Minor7 => &["1", "m3", "P5", "m7"],
            ChordShape::Dominant7 => &["1", "M3", "P5", "m7"],
            ChordShape::HalfDiminished7 => &["1", "m3", "dim5", "m7"],
            ChordShape::Diminished7 => &["1", "m3", "dim5", "dim7"],
        }
    }

    /// Suffix written after the root (`m`, `°`, `maj7` ...)
    pub fn symbol(self) -> &'static str {
        match self {
            ChordShape::Major => "",
            ChordShape::Minor => "m",
            ChordShape::Diminished => "°",
            ChordShape::Augmented => "+",
            ChordShape::Major7 => "maj7",
            ChordShape::Minor7 => "m7",
            ChordShape::Dominant7 => "7",
            ChordShape::HalfDiminished7 => "m7♭5",
            ChordShape::Diminished7 => "°7",
        }
    }

    /// Identify a shape from semitone distances above the root (root excluded)
    pub fn from_semitones(semitones: &[u8]) -> Option<Self> {
        match semitones {
            [4, 7] => Some(ChordShape::Major),
            [3, 7] => Some(ChordShape::Minor),
            [3, 6] => Some(ChordShape::Diminished),
            [4, 8] => Some(ChordShape::Augmented),
            [4, 7, 11] => Some(ChordShape::Major7),
            [3, 7, 10] => Some(ChordShape::Minor7),
            [4, 7, 10] => Some(ChordShape::Dominant7),
            [3, 6, 10] => Some(ChordShape::HalfDiminished7),
            [3, 6, 9] => Some(ChordShape::Diminished7),
            _ => None,
        }
    }

    /// Major-sounding shapes get upper-case roman numerals
    fn is_major_family(self) -> bool {
        matches!(
            self,
            ChordShape::Major | ChordShape::Augmented | ChordShape::Major7 | ChordShape::Dominant7
        )
    }
}

impl FromStr for ChordShape {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "maj" | "major" | "M" => Ok(ChordShape::Major),
            "min" | "minor" | "m" => Ok(ChordShape::Minor),
            "dim" | "°" => Ok(ChordShape::Diminished),
            "aug" | "+" => Ok(ChordShape::Augmented),
            "maj7" | "M7" => Ok(ChordShape::Major7),
            "min7" | "m7" => Ok(ChordShape::Minor7),
            "7" | "dom7" => Ok(ChordShape::Dominant7),
            "m7♭5" | "m7b5" | "ø" => Ok(ChordShape::HalfDiminished7),
            "dim7" | "°7" => Ok(ChordShape::Diminished7),
            _ => Err(TheoryError::UnknownChordShape(s.to_string())),
        }
    }
}

/// Triad or seventh chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordSize {
    Triad,
    Tetrad,
}

impl ChordSize {
    fn note_count(self) -> usize {
        match self {
            ChordSize::Triad => 3,
            ChordSize::Tetrad => 4,
        }
    }
}

/// A spelled chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    root: SpelledNote,
    shape: ChordShape,
    notes: Vec<SpelledNote>,
}

impl Chord {
    pub fn root(&self) -> SpelledNote {
        self.root
    }

    pub fn shape(&self) -> ChordShape {
        self.shape
    }

    pub fn notes(&self) -> &[SpelledNote] {
        &self.notes
    }

    /// Roman numeral for this chord on a scale degree (1-based), e.g. `ii` or `vii°`
    pub fn roman_numeral(&self, degree: usize) -> String {
        const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
        let Some(numeral) = degree.checked_sub(1).and_then(|i| NUMERALS.get(i)) else {
            return degree.to_string();
        };
        let numeral = if self.shape.is_major_family() {
            numeral.to_string()
        } else {
            numeral.to_lowercase()
        };
        match self.shape {
            ChordShape::Major | ChordShape::Minor => numeral,
            shape => format!("{}{}", numeral, shape.symbol()),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.shape.symbol())
    }
}

/// Spell a chord of the given shape on a root spelling
pub fn spell_chord(root: &str, shape: ChordShape) -> Result<Chord> {
    let notes = compose_scale(root, shape.intervals())?;
    Ok(Chord {
        root: SpelledNote::parse(root)?,
        shape,
        notes,
    })
}

/// The chord built on a scale degree (1-based) by stacking scale thirds.
///
/// Returns `None` if the degree is out of range or the stacked notes don't
/// form a known shape.
pub fn diatonic_chord(scale: &Scale, degree: usize, size: ChordSize) -> Option<Chord> {
    if degree == 0 || degree > scale.len() {
        return None;
    }
    let notes: Vec<SpelledNote> = (0..size.note_count())
        .map(|k| scale.notes()[(degree - 1 + 2 * k) % scale.len()])
        .collect();

    let root = notes[0];
    let semitones: Vec<u8> = notes[1..]
        .iter()
        .map(|n| (n.pitch_class() as i16 - root.pitch_class() as i16).rem_euclid(12) as u8)
        .collect();
    let shape = ChordShape::from_semitones(&semitones)?;

    Some(Chord { root, shape, notes })
}

/// Diatonic chords on every degree of a scale, skipping unrecognised ones
pub fn diatonic_chords(scale: &Scale, size: ChordSize) -> Vec<(usize, Chord)> {
    (1..=scale.len())
        .filter_map(|degree| diatonic_chord(scale, degree, size).map(|chord| (degree, chord)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::scale::ScaleType;

    fn spelled(chord: &Chord) -> Vec<String> {
        chord.notes().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_spell_triads() {
        assert_eq!(spelled(&spell_chord("C", ChordShape::Major).unwrap()), ["C", "E", "G"]);
        assert_eq!(spelled(&spell_chord("F♯", ChordShape::Minor).unwrap()), ["F♯", "A", "C♯"]);
        assert_eq!(spelled(&spell_chord("B", ChordShape::Diminished).unwrap()), ["B", "D", "F"]);
        assert_eq!(spelled(&spell_chord("E", ChordShape::Augmented).unwrap()), ["E", "G♯", "B♯"]);
    }

    #[test]
    fn test_spell_tetrads() {
        let chord = spell_chord("G", ChordShape::Dominant7).unwrap();
        assert_eq!(spelled(&chord), ["G", "B", "D", "F"]);
        assert_eq!(chord.to_string(), "G7");

        let chord = spell_chord("C♯", ChordShape::Diminished7).unwrap();
        assert_eq!(spelled(&chord), ["C♯", "E", "G", "B♭"]);

        let chord = spell_chord("B", ChordShape::HalfDiminished7).unwrap();
        assert_eq!(chord.to_string(), "Bm7♭5");
    }

    #[test]
    fn test_spell_chord_invalid_root() {
        assert_eq!(
            spell_chord("?", ChordShape::Major),
            Err(TheoryError::InvalidNoteToken("?".to_string()))
        );
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("min7".parse::<ChordShape>(), Ok(ChordShape::Minor7));
        assert_eq!("m7♭5".parse::<ChordShape>(), Ok(ChordShape::HalfDiminished7));
        assert!("sus4".parse::<ChordShape>().is_err());
    }

    #[test]
    fn test_shape_templates_identify_themselves() {
        for shape in ChordShape::ALL {
            let chord = spell_chord("D", shape).unwrap();
            let root = chord.root().pitch_class() as i16;
            let semitones: Vec<u8> = chord.notes()[1..]
                .iter()
                .map(|n| (n.pitch_class() as i16 - root).rem_euclid(12) as u8)
                .collect();
            assert_eq!(ChordShape::from_semitones(&semitones), Some(shape));
        }
    }

    #[test]
    fn test_major_scale_triads() {
        let c_major = Scale::new("C", ScaleType::Major).unwrap();
        let numerals: Vec<String> = diatonic_chords(&c_major, ChordSize::Triad)
            .iter()
            .map(|(degree, chord)| chord.roman_numeral(*degree))
            .collect();
        assert_eq!(numerals, ["I", "ii", "iii", "IV", "V", "vi", "vii°"]);
    }

    #[test]
    fn test_major_scale_tetrads() {
        let g_major = Scale::new("G", ScaleType::Major).unwrap();
        let chords: Vec<String> = diatonic_chords(&g_major, ChordSize::Tetrad)
            .iter()
            .map(|(_, chord)| chord.to_string())
            .collect();
        assert_eq!(
            chords,
            ["Gmaj7", "Am7", "Bm7", "Cmaj7", "D7", "Em7", "F♯m7♭5"]
        );

        let seventh = diatonic_chord(&g_major, 7, ChordSize::Tetrad).unwrap();
        assert_eq!(spelled(&seventh), ["F♯", "A", "C", "E"]);
        assert_eq!(seventh.roman_numeral(7), "viim7♭5");
    }

    #[test]
    fn test_diatonic_chord_out_of_range() {
        let c_major = Scale::new("C", ScaleType::Major).unwrap();
        assert!(diatonic_chord(&c_major, 0, ChordSize::Triad).is_none());
        assert!(diatonic_chord(&c_major, 8, ChordSize::Triad).is_none());
    }
}
