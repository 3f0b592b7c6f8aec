// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! Note spelling, the interval catalog, scale composition, enharmonic
//! tonic resolution and chord spelling. Everything here is a pure
//! function of its arguments.

pub mod chord;
pub mod interval;
pub mod note;
pub mod resolver;
pub mod scale;

pub use chord::{diatonic_chord, diatonic_chords, spell_chord, Chord, ChordShape, ChordSize};
pub use interval::{diatonic_step, Interval};
pub use note::{
    count_accidentals, count_accidentals_in, extract_natural_letter, normalize_accidentals,
    AccidentalCount, NaturalNote, SpelledNote, FLAT, SHARP,
};
pub use resolver::{
    expand_tonic_candidates, is_acceptable_tonic, resolve, resolve_ascii, resolve_key,
    ResolutionPolicy, ACCEPTABLE_TONICS,
};
pub use scale::{
    compose_scale, spell_interval, spell_target, CustomScaleDefinition, Key, Scale, ScaleRegistry,
    ScaleType,
};
