//! Occasion-specific outfit composition
//!
//! Each strategy owns one occasion bucket. They are tried in a fixed
//! priority order; the first one that applies builds the batch, unless it
//! produced nothing and is marked as falling through, in which case the
//! next applicable strategy gets a turn.

mod ceremonial;
mod everyday;
mod party;
mod sporty;

pub use ceremonial::{FormalStrategy, FuneralStrategy, OfficeCeremonyStrategy, FORMAL_OCCASIONS};
pub use everyday::{CasualStrategy, RitualStrategy};
pub use party::PartyStrategy;
pub use sporty::SportyStrategy;

use crate::catalog::Catalog;
use crate::color;
use crate::requirements::requested_layer_kinds;
use crate::scoring::ScoreBoard;
use crate::selection::*;
use crate::session::SessionState;
use crate::types::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Everything a strategy reads, plus the batch it writes into
pub struct Assembly<'a> {
    pub catalog: &'a Catalog,
    /// Items that passed the generic occasion and requirement filter
    pub pools: Pools<'a>,
    pub occasions: &'a Occasions,
    pub requirements: &'a RequirementSet,
    pub context: &'a Context,
    pub scores: &'a ScoreBoard,
    pub session: &'a mut SessionState,
    /// Shown-combination cache key for this request
    pub shown_key: &'a str,
    pub batch: OutfitBatch,
}

impl<'a> Assembly<'a> {
    /// The whole catalog, partitioned. Carve-out buckets select from here
    /// instead of the filtered pools.
    pub fn full_pools(&self) -> Pools<'a> {
        Pools::partition(self.catalog.items())
    }

    /// Best unused item of a pool
    pub fn pick(&mut self, pool: &[&'a Item]) -> Option<&'a Item> {
        let open: Vec<&'a Item> = pool.iter().copied().filter(|i| !self.batch.uses(i)).collect();
        let scores = self.scores;
        pick_best(&open, |i| scores.get(&i.id), self.session)
    }

    /// Best unused top, then the unused bottom that goes best with it.
    /// Pairs already shown for this context are skipped while others remain.
    pub fn pick_pair(
        &mut self,
        tops: &[&'a Item],
        bottoms: &[&'a Item],
    ) -> Option<(&'a Item, &'a Item)> {
        let top = self.pick(tops)?;
        let open: Vec<&'a Item> = bottoms
            .iter()
            .copied()
            .filter(|b| !self.batch.uses(b))
            .collect();
        let unseen: Vec<&'a Item> = open
            .iter()
            .copied()
            .filter(|b| !self.session.was_shown(self.shown_key, &top.id, &b.id))
            .collect();
        let pool = if unseen.is_empty() { open } else { unseen };

        let scores = self.scores;
        let bottom = pick_best(
            &pool,
            |b| scores.get(&b.id) + color::pair_score(top, b),
            self.session,
        )?;
        Some((top, bottom))
    }

    /// Layer for an outfit built from `anchor`, when one is wanted
    pub fn layer_for(&mut self, layers: &[&'a Item], anchor: &[&Item]) -> Option<&'a Item> {
        if layers.is_empty() || !wants_layer(self.requirements, self.context) {
            return None;
        }
        let kinds = requested_layer_kinds(self.requirements);
        let tags: BTreeSet<String> = anchor.iter().flat_map(|i| i.tags.iter().cloned()).collect();
        choose_layer(layers, &kinds, &tags, self.scores, self.session)
    }

    /// Add up to `count` top+bottom outfits from `pools`. A layer is attached
    /// from `pools.layers` when wanted, which also suffixes the kind.
    pub fn add_pairs(&mut self, kind: &str, pools: &Pools<'a>, count: usize, reason: &str) -> usize {
        let mut added = 0;
        for _ in 0..count {
            if self.batch.is_full() {
                break;
            }
            let Some((top, bottom)) = self.pick_pair(&pools.tops, &pools.bottoms) else {
                break;
            };
            let mut items = vec![top, bottom];
            let layer = self.layer_for(&pools.layers, &items);
            items.extend(layer);
            let outfit = make_outfit(
                &with_layer_suffix(kind, layer.is_some()),
                items,
                layered_reason(reason, layer.is_some()),
                self.scores,
            );
            if !self.batch.push(outfit) {
                break;
            }
            added += 1;
        }
        added
    }

    /// Add one one-piece outfit, optionally placed first in the batch
    pub fn add_one_piece(&mut self, kind: &str, pools: &Pools<'a>, reason: &str, first: bool) -> bool {
        if !first && self.batch.is_full() {
            return false;
        }
        let Some(piece) = self.pick(&pools.one_pieces) else {
            return false;
        };
        let mut items = vec![piece];
        let layer = self.layer_for(&pools.layers, &items);
        items.extend(layer);
        let outfit = make_outfit(
            &with_layer_suffix(kind, layer.is_some()),
            items,
            layered_reason(reason, layer.is_some()),
            self.scores,
        );
        if first {
            self.batch.push_front(outfit)
        } else {
            self.batch.push(outfit)
        }
    }
}

fn layered_reason(reason: &str, layered: bool) -> String {
    if layered {
        format!("{reason} (with layer)")
    } else {
        reason.to_string()
    }
}

/// Composition rule for one occasion bucket
pub trait OutfitStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies(&self, occasions: &Occasions) -> bool;

    /// Push outfits into `asm.batch`
    fn build(&self, asm: &mut Assembly<'_>);

    /// Let lower-priority strategies run when this one added nothing
    fn falls_through_when_empty(&self) -> bool {
        false
    }
}

/// Pairs from the filtered candidates, then one-pieces. Applies to anything.
pub struct GenericStrategy;

impl OutfitStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn applies(&self, _occasions: &Occasions) -> bool {
        true
    }

    fn build(&self, asm: &mut Assembly<'_>) {
        let pools = asm.pools.clone();
        let reason = format!("Good match for {}", asm.occasions);
        asm.add_pairs("top+bottom", &pools, MAX_OUTFITS, &reason);
        while !asm.batch.is_full() && asm.add_one_piece("one_piece", &pools, &reason, false) {}
    }
}

/// Formal occasions keep their hard requirements even when under-filled
pub fn is_relaxation_exempt(occasions: &Occasions) -> bool {
    occasions.contains_any(FORMAL_OCCASIONS)
}

/// All strategies in priority order
pub fn registry() -> Vec<Box<dyn OutfitStrategy>> {
    vec![
        Box::new(OfficeCeremonyStrategy),
        Box::new(FuneralStrategy),
        Box::new(PartyStrategy),
        Box::new(FormalStrategy),
        Box::new(RitualStrategy),
        Box::new(CasualStrategy),
        Box::new(SportyStrategy),
        Box::new(GenericStrategy),
    ]
}

/// Run the first applicable strategy, moving past ones that fall through
/// empty-handed. Returns the name of the strategy that settled the batch.
pub fn dispatch(strategies: &[Box<dyn OutfitStrategy>], asm: &mut Assembly<'_>) -> &'static str {
    let occasions = asm.occasions;
    let mut last = "none";
    for strategy in strategies.iter().filter(|s| s.applies(occasions)) {
        let before = asm.batch.len();
        strategy.build(asm);
        last = strategy.name();
        debug!(
            "Strategy {} added {} outfits",
            last,
            asm.batch.len().saturating_sub(before)
        );
        if asm.batch.len() > before || !strategy.falls_through_when_empty() {
            break;
        }
    }
    last
}

/// Give every outfit still missing a layer one of the explicitly requested
/// kind. Layers come from the whole catalog.
pub fn attach_requested_layers(asm: &mut Assembly<'_>, requested: &RequirementSet) {
    if requested.forbids("layer") {
        return;
    }
    let kinds = requested_layer_kinds(requested);
    if kinds.is_empty() {
        return;
    }
    let layers = asm.catalog.in_category(Category::Layer);
    let scores = asm.scores;
    for outfit in asm.batch.outfits_mut() {
        if outfit.has_layer() {
            continue;
        }
        let Some(layer) = choose_layer(&layers, &kinds, &outfit.tags(), scores, asm.session) else {
            continue;
        };
        outfit.items.push(layer.clone());
        outfit.kind = with_layer_suffix(&outfit.kind, true);
        outfit.reason = layered_reason(&outfit.reason, true);
        outfit.score += scores.get(&layer.id);
        outfit.color_harmony = color::classify(&outfit.items);
    }
}
