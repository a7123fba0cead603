//! Party, wedding and date outfits

use super::{Assembly, OutfitStrategy};
use crate::filter::{PARTY_OCCASIONS, PARTY_TAGS};
use crate::types::{Item, Occasions};

const ETHNIC_MARKERS: &[&str] = &["ethnic", "ritual", "festive", "temple", "traditional"];
const ETHNIC_LABELS: &[&str] = &["ethnic", "ritual", "festive"];
const SWIM_TAGS: &[&str] = &["swimming", "swimwear"];

/// Parties, weddings, dates: two stylish pairs led by a one-piece
pub struct PartyStrategy;

impl PartyStrategy {
    fn party_tags(occasions: &Occasions) -> Vec<&'static str> {
        let mut tags = PARTY_TAGS.to_vec();
        if occasions.contains("beach party") {
            tags.push("beach_party");
        } else if occasions.contains("wedding") {
            tags.push("wedding");
        }
        tags
    }
}

impl OutfitStrategy for PartyStrategy {
    fn name(&self) -> &'static str {
        "party"
    }

    fn applies(&self, occasions: &Occasions) -> bool {
        occasions.contains_any(PARTY_OCCASIONS)
    }

    fn build(&self, asm: &mut Assembly<'_>) {
        let tags = Self::party_tags(asm.occasions);
        let allow_ethnic = asm.occasions.contains_any(ETHNIC_LABELS);
        let suitable = |i: &Item| {
            i.has_any_tag(&tags) && (allow_ethnic || !i.has_any_tag(ETHNIC_MARKERS))
        };

        let mut pools = asm.pools.retain(suitable);
        pools.one_pieces.retain(|i| !i.has_any_tag(SWIM_TAGS));

        let occasion = asm.occasions.to_string();
        asm.add_pairs(
            "top+bottom",
            &pools,
            2,
            &format!("Stylish combination for {occasion}"),
        );
        asm.add_one_piece(
            "one_piece",
            &pools,
            &format!("Elegant one-piece for {occasion}"),
            true,
        );
    }
}
