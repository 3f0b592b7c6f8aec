// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Enharmonic tonic resolution.
//!
//! A circle position may be labelled with two spellings of the same pitch
//! (`F♯/G♭`). Resolving picks one of them by building the major scale on
//! each and applying a [`ResolutionPolicy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::note::normalize_accidentals;
use super::scale::{Key, Scale, ScaleType};
use crate::error::{Result, TheoryError};

/// Separator between alternative spellings of a compound tonic
pub const TONIC_SEPARATOR: char = '/';

/// Spellings accepted as a tonic: the keys with at most seven sharps or flats
pub const ACCEPTABLE_TONICS: [&str; 15] = [
    "A", "B", "C", "D", "E", "F", "G", "F♯", "C♯", "B♭", "E♭", "A♭", "D♭", "G♭", "C♭",
];

/// Check a single spelling against [`ACCEPTABLE_TONICS`].
///
/// The letter may be typed in either case (`e♭`); the accidentals must
/// match exactly.
pub fn is_acceptable_tonic(spelling: &str) -> bool {
    let mut chars = spelling.chars();
    let canonical: String = match chars.next() {
        Some(letter) => letter.to_uppercase().chain(chars).collect(),
        None => return false,
    };
    ACCEPTABLE_TONICS.contains(&canonical.as_str())
}

/// How to choose between alternative tonic spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Pick the spelling whose major scale has the fewest sharps and flats
    #[default]
    FewestAccidentals,
    /// Prefer a sharp tonic
    ForceSharp,
    /// Prefer a flat tonic
    ForceFlat,
}

impl ResolutionPolicy {
    pub const ALL: [ResolutionPolicy; 3] = [
        ResolutionPolicy::FewestAccidentals,
        ResolutionPolicy::ForceSharp,
        ResolutionPolicy::ForceFlat,
    ];

    /// Menu label for this policy
    pub fn label(self) -> &'static str {
        match self {
            ResolutionPolicy::FewestAccidentals => "Fewest ♯/♭",
            ResolutionPolicy::ForceSharp => "Force ♯",
            ResolutionPolicy::ForceFlat => "Force ♭",
        }
    }
}

impl FromStr for ResolutionPolicy {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(policy) = Self::ALL.into_iter().find(|p| p.label() == s) {
            return Ok(policy);
        }
        let key = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match key.as_str() {
            "fewest" | "fewestaccidentals" => Ok(ResolutionPolicy::FewestAccidentals),
            "sharp" | "forcesharp" | "force#" | "force♯" => Ok(ResolutionPolicy::ForceSharp),
            "flat" | "forceflat" | "force♭" => Ok(ResolutionPolicy::ForceFlat),
            _ => Err(TheoryError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Split a compound tonic into its alternative spellings, in order
pub fn split_tonic(compound: &str) -> Vec<&str> {
    compound.split(TONIC_SEPARATOR).map(str::trim).collect()
}

/// Major scales for every acceptable spelling in a compound tonic.
///
/// Input order is kept, which decides ties later on. Rejected spellings
/// are dropped silently.
pub fn expand_tonic_candidates(compound: &str) -> Vec<Scale> {
    split_tonic(compound)
        .into_iter()
        .filter_map(|tonic| {
            if !is_acceptable_tonic(tonic) {
                trace!(tonic, "rejecting tonic spelling");
                return None;
            }
            match Scale::new(tonic, ScaleType::Major) {
                Ok(scale) => Some(scale),
                Err(e) => {
                    trace!(tonic, error = %e, "cannot compose candidate scale");
                    None
                }
            }
        })
        .collect()
}

/// Settle a possibly compound tonic on one spelling and return its major scale.
///
/// A single surviving candidate is returned whatever the policy. With
/// several, a forced policy takes the first candidate whose tonic carries
/// the wanted accidental; otherwise (or if none does) the candidate with
/// the fewest accidental glyphs wins, the earliest one on a tie.
pub fn resolve(compound: &str, policy: ResolutionPolicy) -> Result<Scale> {
    let mut candidates = expand_tonic_candidates(compound);
    let no_tonic = || TheoryError::NoValidTonic(compound.to_string());

    if candidates.len() <= 1 {
        return candidates.pop().ok_or_else(no_tonic);
    }

    let forced = match policy {
        ResolutionPolicy::ForceSharp => candidates.iter().position(|s| s.tonic().is_sharp()),
        ResolutionPolicy::ForceFlat => candidates.iter().position(|s| s.tonic().is_flat()),
        ResolutionPolicy::FewestAccidentals => None,
    };
    if let Some(index) = forced {
        debug!(tonic = %candidates[index].tonic(), %policy, "forced tonic spelling");
        return Ok(candidates.swap_remove(index));
    }

    let mut best: Option<(usize, usize)> = None;
    for (index, scale) in candidates.iter().enumerate() {
        let score = scale.accidental_count().total();
        debug!(tonic = %scale.tonic(), score, "scored candidate");
        if best.map_or(true, |(_, lowest)| score < lowest) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| candidates.swap_remove(index))
        .ok_or_else(no_tonic)
}

/// Resolve a compound tonic, then compose the requested scale type on it.
///
/// Resolution always uses the major scale, matching key-signature
/// conventions, so `C♯/D♭` in minor settles on D♭ under the default policy.
pub fn resolve_key(compound: &str, scale_type: ScaleType, policy: ResolutionPolicy) -> Result<Key> {
    let major = resolve(compound, policy)?;
    Key::new(&major.tonic().to_string(), scale_type)
}

/// Like [`resolve`], accepting ASCII accidentals (`F#/Gb`)
pub fn resolve_ascii(compound: &str, policy: ResolutionPolicy) -> Result<Scale> {
    resolve(&normalize_accidentals(compound), policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tonic_of(compound: &str, policy: ResolutionPolicy) -> String {
        resolve(compound, policy).unwrap().tonic().to_string()
    }

    #[test]
    fn test_acceptable_tonics() {
        assert!(is_acceptable_tonic("C♭"));
        assert!(is_acceptable_tonic("F♯"));
        assert!(!is_acceptable_tonic("G♯"));
        assert!(!is_acceptable_tonic("F♯♯"));
        assert!(!is_acceptable_tonic("K"));
        assert!(!is_acceptable_tonic(""));
    }

    #[test]
    fn test_lowercase_tonic_letters() {
        assert!(is_acceptable_tonic("e♭"));
        assert!(is_acceptable_tonic("c"));
        assert!(!is_acceptable_tonic("g♯"));

        assert_eq!(tonic_of("e♭", ResolutionPolicy::default()), "E♭");
        assert_eq!(tonic_of("f♯/g♭", ResolutionPolicy::ForceFlat), "G♭");
        let scale = resolve_ascii("eb", ResolutionPolicy::default()).unwrap();
        assert_eq!(scale.spellings(), ["E♭", "F", "G", "A♭", "B♭", "C", "D"]);
    }

    #[test]
    fn test_expand_keeps_input_order() {
        let scales = expand_tonic_candidates("F♯/G♭");
        let tonics: Vec<String> = scales.iter().map(|s| s.tonic().to_string()).collect();
        assert_eq!(tonics, ["F♯", "G♭"]);

        let scales = expand_tonic_candidates("G♯/A♭");
        assert_eq!(scales.len(), 1);
        assert_eq!(scales[0].tonic().to_string(), "A♭");

        assert!(expand_tonic_candidates("K").is_empty());
    }

    #[test]
    fn test_single_candidate_ignores_policy() {
        for policy in ResolutionPolicy::ALL {
            assert_eq!(tonic_of("C", policy), "C");
            assert_eq!(tonic_of("A♯/B♭", policy), "B♭");
        }
    }

    #[test]
    fn test_fewest_accidentals() {
        let policy = ResolutionPolicy::FewestAccidentals;
        assert_eq!(tonic_of("C♯/D♭", policy), "D♭");
        assert_eq!(tonic_of("D♭/C♯", policy), "D♭");
        assert_eq!(tonic_of("B/C♭", policy), "B");
    }

    #[test]
    fn test_fewest_accidentals_tie_keeps_first() {
        let policy = ResolutionPolicy::FewestAccidentals;
        assert_eq!(tonic_of("F♯/G♭", policy), "F♯");
        assert_eq!(tonic_of("G♭/F♯", policy), "G♭");
    }

    #[test]
    fn test_forced_policies() {
        assert_eq!(tonic_of("F♯/G♭", ResolutionPolicy::ForceFlat), "G♭");
        assert_eq!(tonic_of("C♯/D♭", ResolutionPolicy::ForceSharp), "C♯");
        assert_eq!(tonic_of("B/C♭", ResolutionPolicy::ForceFlat), "C♭");
    }

    #[test]
    fn test_forced_policy_falls_back_to_fewest() {
        assert_eq!(tonic_of("E♭/B♭", ResolutionPolicy::ForceSharp), "B♭");
        assert_eq!(tonic_of("A/E", ResolutionPolicy::ForceFlat), "A");
    }

    #[test]
    fn test_no_valid_tonic() {
        for policy in ResolutionPolicy::ALL {
            assert_eq!(
                resolve("K", policy),
                Err(TheoryError::NoValidTonic("K".to_string()))
            );
        }
        assert!(resolve("", ResolutionPolicy::default()).is_err());
        assert!(resolve("G♯/D♯", ResolutionPolicy::default()).is_err());
    }

    #[test]
    fn test_resolved_scale_is_major() {
        let scale = resolve("C♯/D♭", ResolutionPolicy::FewestAccidentals).unwrap();
        assert_eq!(scale.spellings(), ["D♭", "E♭", "F", "G♭", "A♭", "B♭", "C"]);
    }

    #[test]
    fn test_resolve_key() {
        let key = resolve_key("C♯/D♭", ScaleType::NaturalMinor, ResolutionPolicy::default()).unwrap();
        assert_eq!(key.to_string(), "D♭ Minor");
        assert_eq!(key.scale().spellings()[2], "F♭");
    }

    #[test]
    fn test_resolve_ascii() {
        let scale = resolve_ascii("F#/Gb", ResolutionPolicy::ForceFlat).unwrap();
        assert_eq!(scale.tonic().to_string(), "G♭");
    }

    #[test]
    fn test_policy_parse_and_labels() {
        for policy in ResolutionPolicy::ALL {
            assert_eq!(policy.label().parse::<ResolutionPolicy>(), Ok(policy));
        }
        assert_eq!("sharp".parse::<ResolutionPolicy>(), Ok(ResolutionPolicy::ForceSharp));
        assert_eq!("force_flat".parse::<ResolutionPolicy>(), Ok(ResolutionPolicy::ForceFlat));
        assert!("loudest".parse::<ResolutionPolicy>().is_err());
    }
}
