//! Activity wear for sports and outdoor occasions

use super::{Assembly, OutfitStrategy};
use crate::filter::activity_tags;
use crate::selection::{Pools, MAX_OUTFITS};
use crate::types::Occasions;

/// Activity wear. Swimming leads with one-pieces; other activities get
/// activity-tagged pairs, layered only when the weather asks for it.
pub struct SportyStrategy;

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl OutfitStrategy for SportyStrategy {
    fn name(&self) -> &'static str {
        "sporty"
    }

    fn applies(&self, occasions: &Occasions) -> bool {
        activity_tags(occasions.primary()).is_some()
    }

    fn build(&self, asm: &mut Assembly<'_>) {
        let activity = asm.occasions.primary().to_string();
        let Some(tags) = activity_tags(&activity) else {
            return;
        };
        let pools = asm.pools.retain(|i| i.has_any_tag(tags));

        if activity == "swimming" {
            let swim = Pools {
                layers: Vec::new(),
                ..pools
            };
            while !asm.batch.is_full()
                && asm.add_one_piece("one_piece", &swim, "Swimwear (one-piece) for swimming", false)
            {}
            asm.add_pairs("top+bottom", &swim, MAX_OUTFITS, "Swim-appropriate separates");
            return;
        }

        let reason = format!("{} outfit", capitalized(&activity));
        asm.add_pairs("top+bottom", &pools, MAX_OUTFITS, &reason);
    }

    fn falls_through_when_empty(&self) -> bool {
        true
    }
}
