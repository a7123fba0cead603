//! Required / preferred / forbidden keyword extraction from free text

use crate::color;
use crate::types::RequirementSet;
use regex::Regex;
use std::sync::LazyLock;

static COLOR_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:in|wearing|color|colour|shade of|like)\s+(\w+)").expect("valid color regex")
});

static AVOID_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:avoid|not|no|dont want|don't want|skip)\s+(\w+)").expect("valid avoid regex")
});

/// Words that ask for an outer garment
pub const LAYER_KEYWORDS: &[&str] = &[
    "layer", "jacket", "blazer", "sweater", "coat", "cardigan", "overcoat", "wrap",
];

pub const STYLE_KEYWORDS: &[&str] = &[
    "bohemian", "classy", "edgy", "chic", "trendy", "vintage", "modern", "fancy", "stylish",
    "elegant", "traditional", "ethnic", "western", "fusion",
];

pub const FABRIC_KEYWORDS: &[&str] = &[
    "cotton", "linen", "wool", "leather", "silk", "denim", "synthetic", "netted", "breathable",
    "quick_dry",
];

const NEGATIONS: &[&str] = &["no", "not", "skip"];

/// Parse a prompt into keyword sets
pub fn extract(prompt: &str) -> RequirementSet {
    let prompt = prompt.to_lowercase();
    let mut reqs = RequirementSet::default();

    for cap in COLOR_PHRASE.captures_iter(&prompt) {
        let word = &cap[1];
        if color::is_color(word) {
            reqs.required.insert(word.to_string());
        }
    }

    for cap in AVOID_PHRASE.captures_iter(&prompt) {
        reqs.forbidden.insert(cap[1].to_string());
    }

    if prompt.contains("one piece") || prompt.contains("dress") || prompt.contains("gown") {
        reqs.required.insert("one_piece".to_string());
    }
    if prompt.contains("swim") {
        reqs.required.insert("swimwear".to_string());
    }

    if LAYER_KEYWORDS
        .iter()
        .any(|kw| prompt.contains(&format!("no {kw}")))
    {
        reqs.forbidden.insert("layer".to_string());
    } else {
        let kinds: Vec<&str> = LAYER_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| prompt.contains(kw))
            .collect();
        if !kinds.is_empty() {
            reqs.required.insert("layer".to_string());
            // The specific garment named steers which layer gets attached
            reqs.preferred
                .extend(kinds.into_iter().filter(|k| *k != "layer").map(String::from));
        }
    }

    let words: Vec<&str> = prompt
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();
    for kw in STYLE_KEYWORDS.iter().chain(FABRIC_KEYWORDS) {
        let Some(pos) = words.iter().position(|w| w == kw) else {
            continue;
        };
        let negated = pos > 0 && NEGATIONS.contains(&words[pos - 1]);
        if negated {
            reqs.forbidden.insert(kw.to_string());
        } else {
            reqs.preferred.insert(kw.to_string());
        }
    }

    reqs
}

/// Layer garment kinds named in the requirement set, e.g. `["blazer"]`.
/// Falls back to `["layer"]` when only a generic layer was requested.
pub fn requested_layer_kinds(reqs: &RequirementSet) -> Vec<&'static str> {
    LAYER_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| reqs.requires(kw) || reqs.preferred.contains(*kw))
        .collect()
}
