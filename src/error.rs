// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for note spelling and scale composition.
//!
//! Every failure here is recoverable: callers keep their previous state
//! and carry on.

/// Errors reported by the music theory core
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// The spelling contains no natural note letter (A-G)
    #[error("no note letter found in {0:?}")]
    InvalidNoteToken(String),
    /// The interval name is not in the catalog
    #[error("unknown interval {0:?}")]
    UnknownInterval(String),
    /// Every alternative of a compound tonic was rejected
    #[error("no valid tonic in {0:?}")]
    NoValidTonic(String),
    /// A single scale degree could not be spelled, failing the whole scale
    #[error("cannot spell degree {degree} from tonic {tonic:?}: {source}")]
    InvalidDegree {
        tonic: String,
        degree: usize,
        #[source]
        source: Box<TheoryError>,
    },
    #[error("unknown scale type {0:?}")]
    UnknownScaleType(String),
    #[error("unknown chord shape {0:?}")]
    UnknownChordShape(String),
    #[error("unknown resolution policy {0:?}")]
    UnknownPolicy(String),
}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, TheoryError>;
