//! Service configuration from environment variables

use crate::session::{DEFAULT_RECENT_CAPACITY, MAX_RECENT_CAPACITY, MIN_RECENT_CAPACITY};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_PREFERENCES_PATH: &str = "user_preferences.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    /// Wardrobe JSON override; the embedded table is used when unset
    pub catalog_path: Option<PathBuf>,
    pub preferences_path: PathBuf,
    pub recent_capacity: usize,
    /// Fixed RNG seed for reproducible tie-breaks
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_PATH),
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let recent_capacity: usize =
            parse_or(&lookup, "STYLIST_RECENT_CAPACITY", defaults.recent_capacity);
        let clamped = recent_capacity.clamp(MIN_RECENT_CAPACITY, MAX_RECENT_CAPACITY);
        if clamped != recent_capacity {
            warn!(
                "STYLIST_RECENT_CAPACITY={} out of range, using {}",
                recent_capacity, clamped
            );
        }

        Self {
            port: parse_or(&lookup, "STYLIST_PORT", defaults.port),
            catalog_path: lookup("STYLIST_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            preferences_path: lookup("STYLIST_PREFERENCES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.preferences_path),
            recent_capacity: clamped,
            seed: lookup("STYLIST_SEED").and_then(|raw| match raw.trim().parse() {
                Ok(seed) => Some(seed),
                Err(e) => {
                    warn!("Ignoring STYLIST_SEED='{}': {}", raw, e);
                    None
                }
            }),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {}='{}' ({}), using default", key, raw, e);
            default
        }
    }
}
