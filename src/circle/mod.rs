// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Circle-of-fifths placement.
//!
//! The display arranges twelve positions around a circle of fifths, with
//! the current tonic at position 0. This module works out which label and
//! which spelled scale note belongs at each position, and which positions
//! change when the tonic moves. It never draws anything.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::music::interval::Interval;
use crate::music::note::SpelledNote;
use crate::music::resolver::{resolve_key, split_tonic, ResolutionPolicy};
use crate::music::scale::{Key, Scale};

/// Number of positions around the circle
pub const CIRCLE_POSITIONS: usize = 12;

/// Circle labels starting from C, ambiguous positions showing both spellings
pub const CIRCLE_LABELS: [&str; CIRCLE_POSITIONS] = [
    "C", "G", "D", "A", "E", "B", "F♯/G♭", "C♯/D♭", "G♯/A♭", "D♯/E♭", "A♯/B♭", "F",
];

/// One slot per circle position; unused positions are `None`
pub type Placement = [Option<SpelledNote>; CIRCLE_POSITIONS];

/// Circle position of a pitch class, counted in fifths from C
pub fn circle_index(pitch_class: u8) -> usize {
    (pitch_class as usize * 7) % CIRCLE_POSITIONS
}

/// Circle position of a tonic relative to C.
///
/// Compound labels use their first spelling; both spellings sit at the
/// same position anyway.
pub fn tonic_offset(tonic: &str) -> Result<usize> {
    let first = split_tonic(tonic)
        .into_iter()
        .next()
        .ok_or_else(|| TheoryError::InvalidNoteToken(tonic.to_string()))?;
    let note = SpelledNote::parse(first)?;
    Ok(circle_index(note.pitch_class()))
}

/// Circle labels rotated so `tonic` sits at position 0
pub fn circle_from(tonic: &str) -> Result<[&'static str; CIRCLE_POSITIONS]> {
    let offset = tonic_offset(tonic)?;
    Ok(std::array::from_fn(|i| {
        CIRCLE_LABELS[(i + offset) % CIRCLE_POSITIONS]
    }))
}

/// Circle position of an interval above the tonic (P5 is 1, P4 is 11)
pub fn interval_position(interval: &str) -> Result<usize> {
    let interval = Interval::lookup(interval)?;
    Ok(circle_index(interval.wrapped_semitones()))
}

/// Lay a scale onto the circle, relative to its tonic
pub fn place_scale(scale: &Scale) -> Placement {
    let mut placement: Placement = [None; CIRCLE_POSITIONS];
    for (interval, note) in scale.intervals().iter().zip(scale.notes()) {
        placement[circle_index(interval.wrapped_semitones())] = Some(*note);
    }
    placement
}

/// A circle position whose spelling changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleUpdate {
    pub position: usize,
    /// New spelling; `None` when the position is no longer used
    pub note: Option<SpelledNote>,
}

/// Positions where two index-aligned placements differ.
///
/// A position missing from the shorter slice counts as empty.
pub fn diff_scale(old: &[Option<SpelledNote>], new: &[Option<SpelledNote>]) -> Vec<ScaleUpdate> {
    let len = old.len().max(new.len());
    (0..len)
        .filter_map(|position| {
            let before = old.get(position).copied().flatten();
            let after = new.get(position).copied().flatten();
            (before != after).then_some(ScaleUpdate {
                position,
                note: after,
            })
        })
        .collect()
}

/// Write a scale's notes into an existing placement.
///
/// Only positions the scale uses are touched; the returned updates list
/// the ones whose spelling actually changed.
pub fn replace_scale_notes(placement: &mut Placement, scale: &Scale) -> Vec<ScaleUpdate> {
    let mut updates = Vec::new();
    for (interval, note) in scale.intervals().iter().zip(scale.notes()) {
        let position = circle_index(interval.wrapped_semitones());
        if placement[position] != Some(*note) {
            placement[position] = Some(*note);
            updates.push(ScaleUpdate {
                position,
                note: Some(*note),
            });
        }
    }
    updates
}

/// Everything the display needs for one key: labels and scale placement
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    key: Key,
    labels: [&'static str; CIRCLE_POSITIONS],
    notes: Placement,
}

impl Circle {
    pub fn new(key: Key) -> Result<Self> {
        let labels = circle_from(&key.tonic().to_string())?;
        let notes = place_scale(key.scale());
        Ok(Self { key, labels, notes })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn labels(&self) -> &[&'static str; CIRCLE_POSITIONS] {
        &self.labels
    }

    pub fn notes(&self) -> &Placement {
        &self.notes
    }

    /// Header text, e.g. `Key: E♭ Major`
    pub fn header(&self) -> String {
        format!("Key: {}", self.key)
    }

    /// Move the tonic to the label at `position`.
    ///
    /// The label is resolved with `policy`, the same scale type is kept,
    /// and the positions whose spelling changed are returned alongside the
    /// new circle. On error the caller keeps the current circle.
    pub fn select(&self, position: usize, policy: ResolutionPolicy) -> Result<(Circle, Vec<ScaleUpdate>)> {
        let label = self.labels[position % CIRCLE_POSITIONS];
        let key = resolve_key(label, self.key.scale().scale_type(), policy)?;
        let next = Circle::new(key)?;
        let updates = diff_scale(&self.notes, &next.notes);
        Ok((next, updates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::scale::ScaleType;

    fn note(s: &str) -> Option<SpelledNote> {
        Some(SpelledNote::parse(s).unwrap())
    }

    #[test]
    fn test_circle_index() {
        assert_eq!(circle_index(0), 0);
        assert_eq!(circle_index(7), 1);
        assert_eq!(circle_index(6), 6);
        assert_eq!(circle_index(5), 11);
    }

    #[test]
    fn test_interval_positions() {
        let expected = [
            ("1", 0),
            ("P5", 1),
            ("M2", 2),
            ("M6", 3),
            ("M3", 4),
            ("M7", 5),
            ("♭5", 6),
            ("♯4", 6),
            ("m2", 7),
            ("m6", 8),
            ("m3", 9),
            ("m7", 10),
            ("P4", 11),
        ];
        for (interval, position) in expected {
            assert_eq!(interval_position(interval).unwrap(), position, "{}", interval);
        }
        assert!(interval_position("tritone").is_err());
    }

    #[test]
    fn test_tonic_offsets() {
        assert_eq!(tonic_offset("C").unwrap(), 0);
        assert_eq!(tonic_offset("B").unwrap(), 5);
        assert_eq!(tonic_offset("C♭").unwrap(), 5);
        assert_eq!(tonic_offset("F♯/G♭").unwrap(), 6);
        assert_eq!(tonic_offset("D♭").unwrap(), 7);
        assert_eq!(tonic_offset("F").unwrap(), 11);
        assert!(tonic_offset("K").is_err());
    }

    #[test]
    fn test_circle_from() {
        assert_eq!(circle_from("C").unwrap(), CIRCLE_LABELS);
        let g = circle_from("G").unwrap();
        assert_eq!(g[0], "G");
        assert_eq!(g[5], "F♯/G♭");
        assert_eq!(g[11], "C");
    }

    #[test]
    fn test_place_major_scale() {
        let scale = Scale::new("D", ScaleType::Major).unwrap();
        let placement = place_scale(&scale);
        assert_eq!(placement[0], note("D"));
        assert_eq!(placement[1], note("A"));
        assert_eq!(placement[4], note("F♯"));
        assert_eq!(placement[11], note("G"));
        assert_eq!(placement.iter().filter(|n| n.is_none()).count(), 5);
    }

    #[test]
    fn test_diff_scale() {
        let old = [note("C"), note("G"), None];
        let new = [note("C"), note("G♭"), note("D")];
        assert_eq!(
            diff_scale(&old, &new),
            vec![
                ScaleUpdate { position: 1, note: note("G♭") },
                ScaleUpdate { position: 2, note: note("D") },
            ]
        );
        assert!(diff_scale(&new, &new).is_empty());
        assert_eq!(
            diff_scale(&new, &new[..2]),
            vec![ScaleUpdate { position: 2, note: None }]
        );
    }

    #[test]
    fn test_replace_scale_notes() {
        let c_major = Scale::new("C", ScaleType::Major).unwrap();
        let g_major = Scale::new("G", ScaleType::Major).unwrap();
        let mut placement = place_scale(&c_major);

        let updates = replace_scale_notes(&mut placement, &g_major);
        assert_eq!(updates.len(), 7);
        assert_eq!(placement, place_scale(&g_major));
        assert!(replace_scale_notes(&mut placement, &g_major).is_empty());
    }

    #[test]
    fn test_select_resolves_compound_label() {
        let circle = Circle::new(Key::new("C", ScaleType::Major).unwrap()).unwrap();
        assert_eq!(circle.header(), "Key: C Major");

        let (next, updates) = circle.select(7, ResolutionPolicy::FewestAccidentals).unwrap();
        assert_eq!(next.key().tonic().to_string(), "D♭");
        assert_eq!(next.labels()[0], "C♯/D♭");
        assert_eq!(next.notes()[0], note("D♭"));
        assert!(updates.iter().any(|u| u.position == 0 && u.note == note("D♭")));

        let (sharp, _) = circle.select(7, ResolutionPolicy::ForceSharp).unwrap();
        assert_eq!(sharp.key().tonic().to_string(), "C♯");
    }

    #[test]
    fn test_select_keeps_scale_type() {
        let circle = Circle::new(Key::new("A", ScaleType::NaturalMinor).unwrap()).unwrap();
        let (next, _) = circle.select(1, ResolutionPolicy::default()).unwrap();
        assert_eq!(next.header(), "Key: E Minor");
    }
}
