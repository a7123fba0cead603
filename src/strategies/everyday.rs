//! Ritual and casual buckets that select from the filtered candidates

use super::{Assembly, OutfitStrategy};
use crate::selection::MAX_OUTFITS;
use crate::types::{Item, Occasions};
use std::collections::BTreeSet;

const RITUAL_OCCASIONS: &[&str] = &["ritual", "temple", "home_ritual", "ceremony", "festival"];
const RITUAL_TAGS: &[&str] = &[
    "traditional", "ritual", "ethnic", "temple", "festival", "home_ritual", "ceremony",
];

const CASUAL_OCCASIONS: &[&str] = &["picnic", "shopping", "casual"];
const CASUAL_MARKERS: &[&str] = &["shopping", "picnic", "casual", "outing"];
const CASUAL_STYLE_TAGS: &[&str] = &[
    "modern", "fusion", "casual", "stylish", "shopping", "picnic", "comfortable", "lightweight",
    "trendy", "cotton", "denim", "jeans", "outing",
];

/// Rituals, temple visits and festivals: a traditional one-piece, then
/// traditional pairs
pub struct RitualStrategy;

impl OutfitStrategy for RitualStrategy {
    fn name(&self) -> &'static str {
        "ritual"
    }

    fn applies(&self, occasions: &Occasions) -> bool {
        occasions.contains_any(RITUAL_OCCASIONS)
    }

    fn build(&self, asm: &mut Assembly<'_>) {
        let pools = asm.pools.retain(|i| i.has_any_tag(RITUAL_TAGS));
        let reason = format!("Traditional/ritual outfit for {}", asm.occasions);
        asm.add_one_piece("one_piece", &pools, &reason, false);
        asm.add_pairs("top+bottom", &pools, 2, &reason);
    }
}

/// Picnics, shopping and casual outings
pub struct CasualStrategy;

impl CasualStrategy {
    /// Every tag worn by a casual-marked candidate, plus the core casual styles
    fn casual_vocabulary<'i>(items: impl IntoIterator<Item = &'i Item>) -> BTreeSet<String> {
        let mut vocabulary: BTreeSet<String> = CASUAL_STYLE_TAGS.iter().map(|t| t.to_string()).collect();
        for item in items {
            if item.has_any_tag(CASUAL_MARKERS) {
                vocabulary.extend(item.tags.iter().cloned());
            }
        }
        vocabulary
    }
}

impl OutfitStrategy for CasualStrategy {
    fn name(&self) -> &'static str {
        "casual"
    }

    fn applies(&self, occasions: &Occasions) -> bool {
        occasions.contains_any(CASUAL_OCCASIONS)
    }

    fn build(&self, asm: &mut Assembly<'_>) {
        let candidates = &asm.pools;
        let vocabulary = Self::casual_vocabulary(
            candidates
                .tops
                .iter()
                .chain(&candidates.bottoms)
                .chain(&candidates.layers)
                .copied(),
        );
        let pools = asm.pools.retain(|i| i.shares_tag_with(&vocabulary));
        let reason = format!("Best wardrobe match for {}", asm.occasions);
        asm.add_pairs("top+bottom", &pools, MAX_OUTFITS, &reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_casual_vocabulary_collects_marked_items() {
        let marked = Item {
            id: "a".into(),
            name: "a".into(),
            category: Category::Topwear,
            tags: ["picnic", "linen"].iter().map(|t| t.to_string()).collect(),
            image: String::new(),
        };
        let unmarked = Item {
            id: "b".into(),
            tags: ["wool"].iter().map(|t| t.to_string()).collect(),
            ..marked.clone()
        };
        let vocabulary = CasualStrategy::casual_vocabulary([&marked, &unmarked]);
        assert!(vocabulary.contains("linen"));
        assert!(vocabulary.contains("denim"));
        assert!(!vocabulary.contains("wool"));
    }

    #[test]
    fn test_applies() {
        assert!(RitualStrategy.applies(&Occasions::single("festival")));
        assert!(CasualStrategy.applies(&Occasions::single("shopping")));
        assert!(!CasualStrategy.applies(&Occasions::single("party")));
    }
}
