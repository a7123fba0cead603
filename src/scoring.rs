//! Additive desirability scores for catalog items

use crate::preferences::UserPreferences;
use crate::requirements::LAYER_KEYWORDS;
use crate::types::*;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Occasions that get the formal-wear bonuses
pub const FORMAL_SCORING_OCCASIONS: &[&str] = &["office", "business meeting", "interview", "formal"];

const GENERIC_STYLE_TAGS: &[&str] = &["formal", "casual", "party"];

fn weather_friendly_tags(weather: Weather) -> &'static [&'static str] {
    match weather {
        Weather::Hot => &["lightweight", "airy", "breathable", "sleeveless", "half-sleeve"],
        Weather::Cold => &["warm", "wool", "sweater", "jacket", "layer"],
        Weather::Rainy => &["waterproof", "quick_dry"],
        Weather::Humid => &["breathable", "lightweight"],
        Weather::Pleasant => &[],
    }
}

/// Everything a score depends on besides the item itself
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub requirements: &'a RequirementSet,
    pub context: &'a Context,
    pub occasions: &'a Occasions,
    pub preferences: &'a UserPreferences,
}

fn count_in(tags: &IndexSet<String>, words: &[String]) -> i32 {
    words.iter().filter(|w| tags.contains(*w)).count() as i32
}

/// Score one item. Higher is better; unsuitable items can go deeply negative.
pub fn score_item(item: &Item, inputs: &ScoreInputs<'_>) -> i32 {
    let ScoreInputs {
        requirements: reqs,
        context: ctx,
        occasions,
        preferences: prefs,
    } = *inputs;
    let tags = &item.tags;
    let mut score = 0;

    score += 30 * reqs.required.iter().filter(|k| tags.contains(*k)).count() as i32;
    score -= 100 * reqs.forbidden.iter().filter(|k| tags.contains(*k)).count() as i32;
    score += 15 * reqs.preferred.iter().filter(|k| tags.contains(*k)).count() as i32;

    if item.has_tag(ctx.weather.as_str()) {
        score += 20;
    }
    if item.has_tag(ctx.time_of_day.as_str()) {
        score += 15;
    }

    if occasions.as_tags().iter().any(|o| tags.contains(o)) {
        score += 50;
    } else if item.has_any_tag(GENERIC_STYLE_TAGS) {
        score += 20;
    }

    score += 10 * weather_friendly_tags(ctx.weather)
        .iter()
        .filter(|t| item.has_tag(t))
        .count() as i32;

    score += 10 * count_in(tags, &prefs.preferred_colors);
    score += 8 * count_in(tags, &prefs.preferred_styles);
    score += 5 * count_in(tags, &prefs.preferred_fabrics);
    score -= 10 * count_in(tags, &prefs.avoid_colors);
    score -= 8 * count_in(tags, &prefs.avoid_styles);
    if prefs
        .preferred_categories
        .iter()
        .any(|c| c == item.category.as_str())
    {
        score += 15;
    }

    if reqs.requires("swimwear") && !item.has_any_tag(&["swimwear", "swimming"]) {
        score -= 1000;
    }
    if reqs.requires("one_piece") && item.category != Category::OnePiece {
        score -= 500;
    }
    if ctx.needs_layer && item.category == Category::Layer {
        score += 30;
    }

    if occasions.contains_any(FORMAL_SCORING_OCCASIONS) {
        if item.has_tag("formal") {
            score += 30;
        }
        if item.has_tag("professional") {
            score += 25;
        }
        if ctx.weather == Weather::Hot {
            if item.has_any_tag(&["breathable", "lightweight"]) {
                score += 15;
            }
            let layer_requested = LAYER_KEYWORDS
                .iter()
                .any(|kw| reqs.requires(kw) || reqs.preferred.contains(*kw));
            if item.category == Category::Layer && !layer_requested {
                score -= 40;
            }
        }
    }

    score
}

/// Per-request scores for every catalog item, keyed by item id
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: HashMap<String, i32>,
}

impl ScoreBoard {
    pub fn build<'i>(items: impl IntoIterator<Item = &'i Item>, inputs: &ScoreInputs<'_>) -> Self {
        let scores = items
            .into_iter()
            .map(|item| (item.id.clone(), score_item(item, inputs)))
            .collect();
        Self { scores }
    }

    /// Unscored items rank as 0
    pub fn get(&self, id: &str) -> i32 {
        self.scores.get(id).copied().unwrap_or(0)
    }

    pub fn total<'i>(&self, items: impl IntoIterator<Item = &'i Item>) -> i32 {
        items.into_iter().map(|i| self.get(&i.id)).sum()
    }
}
