// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled-note music theory for circle-of-fifths displays.
//!
//! Converts a tonic and named intervals into correctly spelled notes,
//! composes scales and chords, settles ambiguous tonics such as `F♯/G♭`,
//! and reports which circle positions change between keys.

pub mod circle;
pub mod config;
pub mod error;
pub mod music;

pub use circle::{diff_scale, place_scale, Circle, ScaleUpdate};
pub use error::TheoryError;
pub use music::{compose_scale, resolve, spell_interval, ResolutionPolicy, Scale, ScaleType, SpelledNote};
