// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named interval catalog.
//!
//! Maps interval names such as `m3`, `aug5`, `P4` or `octave` to a
//! semitone distance and a diatonic step count.

use std::fmt;

use crate::error::{Result, TheoryError};

/// Semitone distance for a catalog interval name
fn semitones_for(name: &str) -> Option<u8> {
    let semitones = match name {
        "unison" | "1" | "P1" => 0,
        "m2" => 1,
        "M2" | "2" => 2,
        "aug2" => 3,
        "m3" => 3,
        "M3" | "3" => 4,
        "dim4" => 4,
        "P4" | "4" => 5,
        "aug4" | "♯4" => 6,
        "dim5" | "♭5" => 6,
        "P5" | "5" => 7,
        "aug5" => 8,
        "m6" => 8,
        "M6" | "6" => 9,
        "dim7" => 9,
        "m7" => 10,
        "M7" | "7" => 11,
        "octave" | "8" | "P8" => 12,
        _ => return None,
    };
    Some(semitones)
}

/// Diatonic step count of an interval name.
///
/// `unison` and `octave` have fixed steps (1 and 8). Anything else takes
/// the first digit in the name, so `dim4` is 4 and `maj9` is 9. Works on
/// any text, catalog entry or not.
pub fn diatonic_step(name: &str) -> Option<u8> {
    match name {
        "unison" => Some(1),
        "octave" => Some(8),
        _ => name
            .chars()
            .find_map(|c| c.to_digit(10))
            .map(|d| d as u8),
    }
}

/// A catalog interval: its name, semitone distance (0-12) and diatonic step (1-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    name: &'static str,
    semitones: u8,
    step: u8,
}

impl Interval {
    /// Every catalog name
    pub const NAMES: [&'static str; 30] = [
        "unison", "1", "P1", "m2", "M2", "2", "aug2", "m3", "M3", "3", "dim4", "P4", "4",
        "aug4", "♯4", "dim5", "♭5", "P5", "5", "aug5", "m6", "M6", "6", "dim7", "m7", "M7",
        "7", "octave", "8", "P8",
    ];

    /// Look up an interval by name
    pub fn lookup(name: &str) -> Result<Self> {
        let unknown = || TheoryError::UnknownInterval(name.to_string());
        let canonical = Self::NAMES
            .iter()
            .copied()
            .find(|n| *n == name)
            .ok_or_else(unknown)?;
        let semitones = semitones_for(canonical).ok_or_else(unknown)?;
        let step = diatonic_step(canonical).ok_or_else(unknown)?;
        Ok(Self {
            name: canonical,
            semitones,
            step,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Semitone distance as catalogued (an octave is 12)
    pub fn semitones(&self) -> u8 {
        self.semitones
    }

    /// Diatonic step count (a third is 3)
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Letters to move forward from the start letter (step - 1)
    pub fn letter_steps(&self) -> usize {
        self.step.saturating_sub(1) as usize
    }

    /// Semitone distance folded into one octave
    pub fn wrapped_semitones(&self) -> u8 {
        self.semitones % 12
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diatonic_step() {
        assert_eq!(diatonic_step("m3"), Some(3));
        assert_eq!(diatonic_step("dim5"), Some(5));
        assert_eq!(diatonic_step("♭7"), Some(7));
        assert_eq!(diatonic_step("maj9"), Some(9));
        assert_eq!(diatonic_step("unison"), Some(1));
        assert_eq!(diatonic_step("octave"), Some(8));
        assert_eq!(diatonic_step("aug"), None);
        assert_eq!(diatonic_step(""), None);
        assert_eq!(diatonic_step("notAnInterval"), None);
    }

    #[test]
    fn test_lookup() {
        let m3 = Interval::lookup("m3").unwrap();
        assert_eq!((m3.semitones(), m3.step()), (3, 3));

        let aug4 = Interval::lookup("aug4").unwrap();
        assert_eq!((aug4.semitones(), aug4.step()), (6, 4));

        let octave = Interval::lookup("octave").unwrap();
        assert_eq!((octave.semitones(), octave.step()), (12, 8));
        assert_eq!(octave.wrapped_semitones(), 0);
        assert_eq!(octave.letter_steps(), 7);
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(
            Interval::lookup("maj9"),
            Err(TheoryError::UnknownInterval("maj9".to_string()))
        );
        assert!(Interval::lookup("").is_err());
        assert!(Interval::lookup("m4").is_err());
    }

    #[test]
    fn test_catalog_ranges() {
        for name in Interval::NAMES {
            let interval = Interval::lookup(name).unwrap();
            assert!(interval.semitones() <= 12, "{}", name);
            assert!((1..=8).contains(&interval.step()), "{}", name);
        }
    }

    #[test]
    fn test_names_match_semitone_table() {
        for name in Interval::NAMES {
            assert!(semitones_for(name).is_some(), "{} has no semitone entry", name);
        }

        // Every name the semitone table knows must be listed too
        let candidates = ["", "♭", "♯", "m", "M", "P", "aug", "dim"]
            .iter()
            .flat_map(|prefix| (1..=8).map(move |n| format!("{}{}", prefix, n)))
            .chain(["unison", "octave", "tritone", "maj7", "min3"].map(String::from));
        for name in candidates {
            if semitones_for(&name).is_some() {
                assert!(Interval::NAMES.contains(&name.as_str()), "{} missing from NAMES", name);
            }
        }
    }
}
