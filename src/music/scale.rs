// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale and key system for spelled notes.
//!
//! Scales are built from a tonic and an ordered template of named
//! intervals. Each degree is spelled directly from the tonic, never from
//! the degree before it, so one odd degree can't throw off the rest.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::interval::Interval;
use super::note::{count_accidentals_in, AccidentalCount, SpelledNote};
use crate::error::{Result, TheoryError};

/// Spell the note an interval above `start`.
///
/// The letter moves forward by the interval's step count. The accidentals
/// make up the difference between the wanted semitone distance and the
/// distance between the two natural letters, after the start note's own
/// accidentals have been taken into account.
pub fn spell_target(start: &SpelledNote, interval: &Interval) -> SpelledNote {
    let start_letter = start.letter();
    let target_letter = start_letter.step(interval.letter_steps());

    let natural_span = (target_letter.chromatic_offset() as i32
        - start_letter.chromatic_offset() as i32)
        .rem_euclid(12);
    // A sharp start sits closer to the target letter, a flat one further away.
    let modified_span = natural_span - start.accidentals();

    let wanted = interval.wrapped_semitones() as i32;
    SpelledNote::new(target_letter, wanted - modified_span)
}

/// Spell the note an interval above a textual start spelling
pub fn spell_interval(start: &str, interval: &str) -> Result<SpelledNote> {
    let start = SpelledNote::parse(start)?;
    let interval = Interval::lookup(interval)?;
    Ok(spell_target(&start, &interval))
}

/// Spell every interval of a template from the tonic.
///
/// The output has one note per template entry, in template order. If any
/// interval is unknown the whole scale fails with
/// [`TheoryError::InvalidDegree`] naming the first bad degree (1-based).
pub fn compose_scale<S: AsRef<str>>(tonic: &str, template: &[S]) -> Result<Vec<SpelledNote>> {
    let start = SpelledNote::parse(tonic)?;
    template
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Interval::lookup(name.as_ref())
                .map(|interval| spell_target(&start, &interval))
                .map_err(|e| TheoryError::InvalidDegree {
                    tonic: tonic.to_string(),
                    degree: i + 1,
                    source: Box::new(e),
                })
        })
        .collect()
}

/// Scale types with built-in interval templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    // Major scale and modes
    Major,        // Ionian
    Dorian,       // Minor with raised 6th
    Phrygian,     // Minor with lowered 2nd
    Lydian,       // Major with raised 4th
    Mixolydian,   // Major with lowered 7th
    NaturalMinor, // Aeolian
    Locrian,      // Diminished 5th

    // Other minor scales
    HarmonicMinor,
    MelodicMinor, // Ascending form

    // Pentatonic scales
    MajorPentatonic,
    MinorPentatonic,

    Blues,

    // Custom scale from named intervals
    Custom,
}

impl ScaleType {
    /// Every built-in type with a template
    pub const BUILT_IN: [ScaleType; 12] = [
        ScaleType::Major,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::NaturalMinor,
        ScaleType::Locrian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
        ScaleType::Blues,
    ];

    /// The named intervals of this scale type, tonic first
    pub fn intervals(self) -> &'static [&'static str] {
        match self {
            ScaleType::Major => &["1", "M2", "M3", "P4", "P5", "M6", "M7"],
            ScaleType::Dorian => &["1", "M2", "m3", "P4", "P5", "M6", "m7"],
            ScaleType::Phrygian => &["1", "m2", "m3", "P4", "P5", "m6", "m7"],
            ScaleType::Lydian => &["1", "M2", "M3", "aug4", "P5", "M6", "M7"],
            ScaleType::Mixolydian => &["1", "M2", "M3", "P4", "P5", "M6", "m7"],
            ScaleType::NaturalMinor => &["1", "M2", "m3", "P4", "P5", "m6", "m7"],
            ScaleType::Locrian => &["1", "m2", "m3", "P4", "dim5", "m6", "m7"],

            ScaleType::HarmonicMinor => &["1", "M2", "m3", "P4", "P5", "m6", "M7"],
            ScaleType::MelodicMinor => &["1", "M2", "m3", "P4", "P5", "M6", "M7"],

            ScaleType::MajorPentatonic => &["1", "M2", "M3", "P5", "M6"],
            ScaleType::MinorPentatonic => &["1", "m3", "P4", "P5", "m7"],

            ScaleType::Blues => &["1", "m3", "P4", "dim5", "P5", "m7"],

            ScaleType::Custom => &[], // Custom scales define their own
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::NaturalMinor => "Minor",
            ScaleType::Locrian => "Locrian",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::MajorPentatonic => "Major Pentatonic",
            ScaleType::MinorPentatonic => "Minor Pentatonic",
            ScaleType::Blues => "Blues",
            ScaleType::Custom => "Custom",
        }
    }

    /// Get the parallel minor/major scale type
    pub fn parallel(self) -> Option<Self> {
        match self {
            ScaleType::Major => Some(ScaleType::NaturalMinor),
            ScaleType::NaturalMinor => Some(ScaleType::Major),
            ScaleType::MajorPentatonic => Some(ScaleType::MinorPentatonic),
            ScaleType::MinorPentatonic => Some(ScaleType::MajorPentatonic),
            _ => None,
        }
    }
}

impl FromStr for ScaleType {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match key.as_str() {
            "major" | "ionian" => Ok(ScaleType::Major),
            "dorian" => Ok(ScaleType::Dorian),
            "phrygian" => Ok(ScaleType::Phrygian),
            "lydian" => Ok(ScaleType::Lydian),
            "mixolydian" => Ok(ScaleType::Mixolydian),
            "minor" | "naturalminor" | "aeolian" => Ok(ScaleType::NaturalMinor),
            "locrian" => Ok(ScaleType::Locrian),
            "harmonicminor" => Ok(ScaleType::HarmonicMinor),
            "melodicminor" => Ok(ScaleType::MelodicMinor),
            "majorpentatonic" | "pentatonicmajor" => Ok(ScaleType::MajorPentatonic),
            "minorpentatonic" | "pentatonicminor" | "pentatonic" => Ok(ScaleType::MinorPentatonic),
            "blues" => Ok(ScaleType::Blues),
            _ => Err(TheoryError::UnknownScaleType(s.to_string())),
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A spelled scale: tonic, template and the notes it produced
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    tonic: SpelledNote,
    scale_type: ScaleType,
    intervals: Vec<Interval>,
    notes: Vec<SpelledNote>,
}

impl Scale {
    /// Compose a built-in scale type from a tonic spelling
    pub fn new(tonic: &str, scale_type: ScaleType) -> Result<Self> {
        let mut scale = Self::custom(tonic, scale_type.intervals())?;
        scale.scale_type = scale_type;
        Ok(scale)
    }

    /// Compose a scale from an arbitrary template of interval names
    pub fn custom<S: AsRef<str>>(tonic: &str, template: &[S]) -> Result<Self> {
        let notes = compose_scale(tonic, template)?;
        let intervals = template
            .iter()
            .map(|name| Interval::lookup(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            tonic: SpelledNote::parse(tonic)?,
            scale_type: ScaleType::Custom,
            intervals,
            notes,
        })
    }

    /// Parse a scale from strings (e.g., "E♭", "minor")
    pub fn parse(tonic: &str, scale: &str) -> Result<Self> {
        Scale::new(tonic, scale.parse()?)
    }

    pub fn tonic(&self) -> SpelledNote {
        self.tonic
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn notes(&self) -> &[SpelledNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Check if this exact spelling is in the scale
    pub fn contains(&self, note: &SpelledNote) -> bool {
        self.notes.contains(note)
    }

    /// Get the scale degree (1-based) of a spelling, if it's in the scale
    pub fn degree_of(&self, note: &SpelledNote) -> Option<usize> {
        self.notes.iter().position(|n| n == note).map(|i| i + 1)
    }

    /// Get the note at a given scale degree (1-based)
    pub fn note_at_degree(&self, degree: usize) -> Option<SpelledNote> {
        if degree == 0 || degree > self.len() {
            return None;
        }
        Some(self.notes[degree - 1])
    }

    /// Spellings as strings, in degree order
    pub fn spellings(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.to_string()).collect()
    }

    /// Accidental glyphs across every degree
    pub fn accidental_count(&self) -> AccidentalCount {
        count_accidentals_in(self.spellings())
    }

    /// Get the parallel scale (major <-> minor)
    pub fn parallel(&self) -> Option<Result<Scale>> {
        self.scale_type
            .parallel()
            .map(|st| Scale::new(&self.tonic.to_string(), st))
    }

    /// Get the relative scale (e.g., C major -> A minor, C minor -> E♭ major)
    pub fn relative(&self) -> Option<Result<Scale>> {
        let (degree, scale_type) = match self.scale_type {
            ScaleType::Major => (6, ScaleType::NaturalMinor),
            ScaleType::NaturalMinor => (3, ScaleType::Major),
            _ => return None,
        };
        let tonic = self.note_at_degree(degree)?;
        Some(Scale::new(&tonic.to_string(), scale_type))
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.scale_type)
    }
}

/// A musical key: a settled tonic spelling and its scale
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    tonic: SpelledNote,
    scale: Scale,
}

impl Key {
    pub fn new(tonic: &str, scale_type: ScaleType) -> Result<Self> {
        let scale = Scale::new(tonic, scale_type)?;
        Ok(Self {
            tonic: scale.tonic(),
            scale,
        })
    }

    pub fn tonic(&self) -> SpelledNote {
        self.tonic
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Move the key up by a named interval, keeping its scale type
    pub fn transpose(&self, interval: &str) -> Result<Self> {
        let interval = Interval::lookup(interval)?;
        let tonic = spell_target(&self.tonic, &interval);
        Key::new(&tonic.to_string(), self.scale.scale_type())
    }

    /// Get the dominant key (V)
    pub fn dominant(&self) -> Result<Self> {
        self.transpose("P5")
    }

    /// Get the subdominant key (IV)
    pub fn subdominant(&self) -> Result<Self> {
        self.transpose("P4")
    }

    /// Get the relative key
    pub fn relative(&self) -> Option<Result<Key>> {
        self.scale.relative().map(|s| {
            s.map(|scale| Key {
                tonic: scale.tonic(),
                scale,
            })
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scale)
    }
}

/// Custom scale definitions that can be loaded from config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomScaleDefinition {
    /// Name of the scale
    pub name: String,
    /// Named intervals from the tonic
    pub intervals: Vec<String>,
}

impl CustomScaleDefinition {
    /// Compose this definition on a tonic
    pub fn to_scale(&self, tonic: &str) -> Result<Scale> {
        Scale::custom(tonic, self.intervals.as_slice())
    }

    /// Check every interval name against the catalog
    pub fn validate(&self) -> Result<()> {
        for name in &self.intervals {
            Interval::lookup(name)?;
        }
        Ok(())
    }
}

/// Registry for custom scale definitions
#[derive(Debug, Clone, Default)]
pub struct ScaleRegistry {
    custom_scales: HashMap<String, CustomScaleDefinition>,
}

impl ScaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom scale, replacing any with the same name
    pub fn register(&mut self, def: CustomScaleDefinition) {
        self.custom_scales.insert(def.name.clone(), def);
    }

    /// Get a scale by name (checks custom first, then built-in)
    pub fn get_scale(&self, tonic: &str, name: &str) -> Result<Scale> {
        if let Some(def) = self.custom_scales.get(name) {
            return def.to_scale(tonic);
        }

        Scale::parse(tonic, name)
    }

    /// List all available scale names
    pub fn available_scales(&self) -> Vec<String> {
        let mut names: Vec<String> = self.custom_scales.keys().cloned().collect();

        let built_in = [
            "major",
            "dorian",
            "phrygian",
            "lydian",
            "mixolydian",
            "minor",
            "locrian",
            "harmonic_minor",
            "melodic_minor",
            "major_pentatonic",
            "minor_pentatonic",
            "blues",
        ];

        names.extend(built_in.iter().map(|s| s.to_string()));
        names.sort();
        names.dedup();
        names
    }
}
