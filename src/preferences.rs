//! Accumulated user taste and its on-disk store

use crate::color;
use crate::error::{Result, StylistError};
use crate::requirements::{FABRIC_KEYWORDS, STYLE_KEYWORDS};
use crate::types::Outfit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Preference sets learned from explicitly chosen outfits. Lists keep
/// insertion order and never hold duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub preferred_colors: Vec<String>,
    pub preferred_styles: Vec<String>,
    pub preferred_fabrics: Vec<String>,
    pub avoid_colors: Vec<String>,
    pub avoid_styles: Vec<String>,
    pub preferred_categories: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

impl UserPreferences {
    /// Fold every recognized color, style, fabric and category of the chosen
    /// outfit into the preferred sets
    pub fn learn_from(&mut self, outfit: &Outfit) {
        for item in &outfit.items {
            for c in color::all_colors().filter(|c| item.has_tag(c)) {
                push_unique(&mut self.preferred_colors, c);
            }
            for s in STYLE_KEYWORDS.iter().filter(|s| item.has_tag(s)) {
                push_unique(&mut self.preferred_styles, s);
            }
            for f in FABRIC_KEYWORDS.iter().filter(|f| item.has_tag(f)) {
                push_unique(&mut self.preferred_fabrics, f);
            }
            push_unique(&mut self.preferred_categories, item.category.as_str());
        }
    }
}

/// Flat JSON file holding one `UserPreferences` record
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read permissively: a missing or unreadable file yields defaults
    pub fn load(&self) -> UserPreferences {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No preferences at {}: {}", self.path.display(), e);
                return UserPreferences::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Ignoring malformed preferences at {}: {}", self.path.display(), e);
                UserPreferences::default()
            }
        }
    }

    /// Overwrite the file with `prefs`
    pub fn save(&self, prefs: &UserPreferences) -> Result<()> {
        let json = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&self.path, json).map_err(|source| StylistError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
