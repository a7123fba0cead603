//! Dress-code buckets that select from the whole catalog: office
//! ceremonies, funerals and formal work occasions

use super::{Assembly, OutfitStrategy};
use crate::filter::{is_office_formal, is_plain_formal};
use crate::selection::{Pools, MAX_OUTFITS};
use crate::types::{Item, Occasions};

const WORK_OCCASIONS: &[&str] = &["office", "business meeting", "office party"];

/// Words in an occasion label that mark a ceremonial office day
pub const CEREMONY_KEYWORDS: &[&str] = &[
    "ethnic", "traditional", "ceremony", "ritual", "festive", "puja", "cultural",
];

const CEREMONY_TAGS: &[&str] = &["traditional", "ritual", "ethnic", "temple", "festival", "ceremony"];

const ETHNIC_TAGS: &[&str] = &[
    "traditional", "ritual", "ethnic", "temple", "festival", "ceremony", "festive", "cultural", "puja",
];

const CORPORATE_TAGS: &[&str] = &[
    "formal", "office", "professional", "business_meeting", "interview", "corporate",
];

/// Occasions held to the office dress code and never relaxed
pub const FORMAL_OCCASIONS: &[&str] = &["office", "business meeting", "interview"];

fn tagged(tags: &'static [&'static str]) -> impl Fn(&Item) -> bool {
    move |item| item.has_any_tag(tags)
}

fn without_layers(pools: Pools<'_>) -> Pools<'_> {
    Pools {
        layers: Vec::new(),
        ..pools
    }
}

/// Office, meeting or office party combined with an ethnic or ceremonial
/// theme: two ethnic sets and one plain formal outfit
pub struct OfficeCeremonyStrategy;

impl OfficeCeremonyStrategy {
    /// Second-chance mix when neither ethnic sets nor plain formal pairs exist
    fn build_fusion(asm: &mut Assembly<'_>) {
        let full = asm.full_pools();
        let ethnic = without_layers(full.retain(tagged(ETHNIC_TAGS)));
        let corporate = without_layers(full.retain(tagged(CORPORATE_TAGS)));

        asm.add_one_piece(
            "ethnic_one_piece",
            &ethnic,
            "Traditional ethnic one-piece for an office ceremony",
            false,
        );
        asm.add_pairs("ethnic_set", &ethnic, 1, "Ethnic ensemble suitable for office rituals");

        let ethnic_top_formal_bottom = Pools {
            tops: ethnic.tops.clone(),
            bottoms: corporate.bottoms.clone(),
            ..Pools::default()
        };
        let formal_top_ethnic_bottom = Pools {
            tops: corporate.tops.clone(),
            bottoms: ethnic.bottoms.clone(),
            ..Pools::default()
        };
        if asm.add_pairs(
            "fusion_formal",
            &ethnic_top_formal_bottom,
            1,
            "Ethnic top with formal bottom for a ceremonial office event",
        ) == 0
        {
            asm.add_pairs(
                "fusion_formal",
                &formal_top_ethnic_bottom,
                1,
                "Formal top with ethnic bottom for a traditional office occasion",
            );
        }

        asm.add_pairs(
            "corporate_formal",
            &corporate,
            1,
            "Professional formal wear for office ceremonies",
        );
    }
}

impl OutfitStrategy for OfficeCeremonyStrategy {
    fn name(&self) -> &'static str {
        "office_ceremony"
    }

    fn applies(&self, occasions: &Occasions) -> bool {
        occasions.contains_any(WORK_OCCASIONS) && occasions.mentions_any(CEREMONY_KEYWORDS)
    }

    fn build(&self, asm: &mut Assembly<'_>) {
        let full = asm.full_pools();
        let ceremonial = without_layers(full.retain(tagged(CEREMONY_TAGS)));
        let plain = without_layers(full.retain(is_plain_formal));

        asm.add_pairs(
            "ethnic_set",
            &ceremonial,
            2,
            "Traditional ethnic wear for an office ceremony",
        );
        asm.add_pairs(
            "formal_office",
            &plain,
            1,
            "Professional formal wear for an office ceremony",
        );

        if asm.batch.is_empty() {
            Self::build_fusion(asm);
        }
    }

    fn falls_through_when_empty(&self) -> bool {
        true
    }
}

/// Funeral-tagged pairs, topped up with strictly plain formal wear
pub struct FuneralStrategy;

impl OutfitStrategy for FuneralStrategy {
    fn name(&self) -> &'static str {
        "funeral"
    }

    fn applies(&self, occasions: &Occasions) -> bool {
        occasions.contains("funeral")
    }

    fn build(&self, asm: &mut Assembly<'_>) {
        let full = asm.full_pools();
        let funeral = without_layers(full.retain(|i| i.has_tag("funeral")));
        let plain = without_layers(full.retain(is_plain_formal));

        asm.add_pairs("funeral", &funeral, MAX_OUTFITS, "Appropriate attire for a funeral");
        asm.add_pairs(
            "formal_office",
            &plain,
            MAX_OUTFITS,
            "Strictly formal attire (no ethnic, party or casual pieces) for a funeral",
        );
    }
}

/// Office, meeting and interview wear under the office dress code
pub struct FormalStrategy;

impl OutfitStrategy for FormalStrategy {
    fn name(&self) -> &'static str {
        "formal"
    }

    fn applies(&self, occasions: &Occasions) -> bool {
        occasions.contains_any(FORMAL_OCCASIONS)
    }

    fn build(&self, asm: &mut Assembly<'_>) {
        let formal = asm.full_pools().retain(is_office_formal);
        let reason = format!("Formal/office outfit for {}", asm.occasions);
        asm.add_pairs("top+bottom", &formal, MAX_OUTFITS, &reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office_ceremony_applies() {
        let strategy = OfficeCeremonyStrategy;
        let labels = |list: &[&str]| Occasions::new(list.iter().map(|s| s.to_string()).collect());
        assert!(strategy.applies(&labels(&["office", "ethnic"])));
        assert!(strategy.applies(&labels(&["business meeting", "traditional"])));
        assert!(!strategy.applies(&labels(&["office"])));
        assert!(!strategy.applies(&labels(&["ritual"])));
    }

    #[test]
    fn test_formal_applies() {
        assert!(FormalStrategy.applies(&Occasions::single("interview")));
        assert!(!FormalStrategy.applies(&Occasions::single("office party")));
        assert!(FuneralStrategy.applies(&Occasions::single("funeral")));
    }
}
