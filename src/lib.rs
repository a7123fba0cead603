//! Stylist - rule-based outfit recommender
//!
//! Turns a free-text occasion prompt into up to three outfits from a tagged
//! wardrobe catalog:
//! - Keyword occasion classification and requirement extraction
//! - Occasion, requirement and dress-code filtering
//! - Additive scoring from context, requirements and learned preferences
//! - Per-occasion composition strategies with recency-aware selection

pub mod types;
pub mod error;
pub mod config;
pub mod catalog;
pub mod context;
pub mod color;
pub mod occasion;
pub mod requirements;
pub mod filter;
pub mod scoring;
pub mod preferences;
pub mod session;
pub mod selection;
pub mod strategies;
pub mod recommender;
pub mod server;

pub use types::*;
pub use error::{Result, StylistError};
pub use config::ServiceConfig;
pub use catalog::Catalog;
pub use preferences::{PreferenceStore, UserPreferences};
pub use session::SessionState;
pub use recommender::Recommender;
pub use strategies::OutfitStrategy;
