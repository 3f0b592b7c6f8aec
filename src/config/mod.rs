// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Settings files.
//!
//! Settings hold the starting key, scale, resolution policy and any custom
//! scale templates. They are loaded once and passed into core calls; the
//! core itself never reads them.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::note::normalize_accidentals;
use crate::music::resolver::{expand_tonic_candidates, ResolutionPolicy};
use crate::music::scale::{CustomScaleDefinition, ScaleRegistry, ScaleType};

/// Root settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Starting key, possibly compound (e.g., "C", "F♯/G♭")
    #[serde(default = "default_key")]
    pub key: String,
    /// Scale name (built-in or custom)
    #[serde(default = "default_scale")]
    pub scale: String,
    /// How ambiguous tonics are settled
    #[serde(default)]
    pub resolution: ResolutionPolicy,
    /// Extra scale templates
    #[serde(default)]
    pub custom_scales: Vec<CustomScaleDefinition>,
}

fn default_key() -> String {
    "C".to_string()
}
fn default_scale() -> String {
    "major".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key: default_key(),
            scale: default_scale(),
            resolution: ResolutionPolicy::default(),
            custom_scales: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a file; `.toml` files are read as TOML, anything else as YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        if is_toml(path) {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml).context("Failed to parse YAML settings")?;
        Ok(settings.normalized())
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text).context("Failed to parse TOML settings")?;
        Ok(settings.normalized())
    }

    /// Key with ASCII accidentals (`F#/Gb`) rewritten to glyphs
    fn normalized(mut self) -> Self {
        self.key = normalize_accidentals(&self.key);
        self
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }

    /// Save settings, picking the format from the extension like [`Settings::load`]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text).with_context(|| format!("Failed to write settings file: {:?}", path))
    }

    /// Registry holding the custom scales
    pub fn registry(&self) -> ScaleRegistry {
        let mut registry = ScaleRegistry::new();
        for def in &self.custom_scales {
            registry.register(def.clone());
        }
        registry
    }

    /// Check the key, scale name and custom scale intervals
    pub fn validate(&self) -> Result<()> {
        if expand_tonic_candidates(&self.key).is_empty() {
            bail!("Key {:?} has no acceptable tonic spelling", self.key);
        }
        for def in &self.custom_scales {
            def.validate()
                .with_context(|| format!("Invalid custom scale {:?}", def.name))?;
        }
        if !self.registry().available_scales().contains(&self.scale) {
            self.scale
                .parse::<ScaleType>()
                .with_context(|| format!("Unknown scale {:?}", self.scale))?;
        }
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("toml")
}
