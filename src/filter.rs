//! Candidate filtering by occasion, requirements and strict dress codes

use crate::catalog::Catalog;
use crate::color;
use crate::types::*;
use tracing::debug;

/// Activity occasions and the tags that make an item suitable for them
const ACTIVITY_TAGS: &[(&str, &[&str])] = &[
    ("swimming", &["swimming", "swimwear", "pool", "quick_dry"]),
    ("gym", &["gym", "sporty", "workout", "exercise", "training"]),
    ("hiking", &["hiking", "trekking", "mountain_climbing", "camping", "climbing", "running"]),
    ("trekking", &["trekking", "hiking", "mountain_climbing", "camping", "climbing", "running"]),
    ("yoga", &["yoga"]),
    ("camping", &["camping"]),
    ("running", &["running"]),
    ("cycling", &["cycling", "biking"]),
];

pub const PARTY_OCCASIONS: &[&str] = &["office party", "party", "beach party", "wedding", "date"];
pub const PARTY_TAGS: &[&str] = &["party", "fancy", "elegant", "stylish"];

const GENERAL_TAGS: &[&str] = &["casual", "versatile"];

/// Tags of an office-appropriate garment
pub const OFFICE_FORMAL_TAGS: &[&str] = &["formal", "office", "professional", "business_meeting", "interview"];

const NOT_OFFICE_TAGS: &[&str] = &[
    "funeral", "party", "fancy", "elegant", "stylish", "date", "chic", "semi_formal", "casual",
];

const PLAIN_FORMAL_TAGS: &[&str] = &["formal", "office", "professional", "business_meeting"];

/// Ceremonial tags a plain formal garment must not carry
pub const CEREMONIAL_TAGS: &[&str] = &[
    "ethnic", "ritual", "traditional", "temple", "festival", "ceremony", "festive", "puja", "cultural",
];

pub fn activity_tags(label: &str) -> Option<&'static [&'static str]> {
    ACTIVITY_TAGS
        .iter()
        .find(|(activity, _)| *activity == label)
        .map(|(_, tags)| *tags)
}

/// Tags that make an item eligible for one occasion label
pub fn occasion_tags(label: &str) -> Vec<String> {
    if let Some(tags) = activity_tags(label) {
        return tags.iter().map(|t| t.to_string()).collect();
    }
    if label == GENERAL_OCCASION {
        return GENERAL_TAGS.iter().map(|t| t.to_string()).collect();
    }
    let mut tags = vec![label.replace(' ', "_")];
    if PARTY_OCCASIONS.contains(&label) {
        tags.extend(PARTY_TAGS.iter().map(|t| t.to_string()));
    }
    tags
}

pub fn matches_occasion(item: &Item, occasions: &Occasions) -> bool {
    occasions
        .labels()
        .iter()
        .any(|label| occasion_tags(label).iter().any(|t| item.has_tag(t)))
}

fn meets_requirement(item: &Item, keyword: &str) -> bool {
    match keyword {
        "one_piece" => item.category == Category::OnePiece,
        "swimwear" => item.has_any_tag(&["swimwear", "swimming"]),
        "layer" => item.category == Category::Layer,
        _ if color::is_color(keyword) => color::item_matches_color(item, keyword),
        _ => item.has_tag(keyword) || item.has_field_value(keyword),
    }
}

/// Every required keyword is met and no forbidden keyword appears
pub fn matches_requirements(item: &Item, reqs: &RequirementSet) -> bool {
    reqs.required.iter().all(|k| meets_requirement(item, k))
        && !reqs
            .forbidden
            .iter()
            .any(|k| item.has_tag(k) || item.has_field_value(k))
}

/// Generic path: occasion match, then requirement match
pub fn candidates<'c>(
    catalog: &'c Catalog,
    occasions: &Occasions,
    reqs: &RequirementSet,
) -> Vec<&'c Item> {
    let items: Vec<&Item> = catalog
        .items()
        .iter()
        .filter(|i| matches_occasion(i, occasions) && matches_requirements(i, reqs))
        .collect();
    debug!(
        "{} of {} items match {} under {:?}",
        items.len(),
        catalog.len(),
        occasions,
        reqs.required
    );
    items
}

/// Office dress code: an office tag and nothing festive or casual
pub fn is_office_formal(item: &Item) -> bool {
    item.has_any_tag(OFFICE_FORMAL_TAGS) && !item.has_any_tag(NOT_OFFICE_TAGS)
}

/// Strictly plain formal wear: the office code minus anything ceremonial
pub fn is_plain_formal(item: &Item) -> bool {
    item.has_any_tag(PLAIN_FORMAL_TAGS)
        && !item.has_any_tag(NOT_OFFICE_TAGS)
        && !item.has_any_tag(CEREMONIAL_TAGS)
}
