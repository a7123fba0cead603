//! Greedy best-score selection with recency bias and random tie-breaks

use crate::color;
use crate::scoring::ScoreBoard;
use crate::session::SessionState;
use crate::types::*;
use rand::seq::SliceRandom;
use std::collections::{BTreeSet, HashSet};

/// Most outfits ever returned for one request
pub const MAX_OUTFITS: usize = 3;

/// Candidate items split by garment slot
#[derive(Debug, Clone, Default)]
pub struct Pools<'c> {
    pub tops: Vec<&'c Item>,
    pub bottoms: Vec<&'c Item>,
    pub one_pieces: Vec<&'c Item>,
    pub layers: Vec<&'c Item>,
}

impl<'c> Pools<'c> {
    pub fn partition(items: impl IntoIterator<Item = &'c Item>) -> Self {
        let mut pools = Self::default();
        for item in items {
            match item.category {
                Category::Topwear => pools.tops.push(item),
                Category::Bottomwear => pools.bottoms.push(item),
                Category::OnePiece => pools.one_pieces.push(item),
                Category::Layer => pools.layers.push(item),
                Category::Unknown => {}
            }
        }
        pools
    }

    /// Same partition restricted to items accepted by `keep`
    pub fn retain<F>(&self, keep: F) -> Self
    where
        F: Fn(&Item) -> bool,
    {
        let sub = |pool: &Vec<&'c Item>| pool.iter().copied().filter(|i| keep(*i)).collect();
        Self {
            tops: sub(&self.tops),
            bottoms: sub(&self.bottoms),
            one_pieces: sub(&self.one_pieces),
            layers: sub(&self.layers),
        }
    }

    pub fn has_pairs(&self) -> bool {
        !self.tops.is_empty() && !self.bottoms.is_empty()
    }
}

/// Pick the highest-ranked item, preferring ones outside the recent-usage
/// ring of their category. Ties are broken at random.
pub fn pick_best<'c, R>(
    pool: &[&'c Item],
    rank: R,
    session: &mut SessionState,
) -> Option<&'c Item>
where
    R: Fn(&Item) -> i32,
{
    let fresh: Vec<&'c Item> = pool
        .iter()
        .copied()
        .filter(|i| !session.is_recent(i.category, &i.id))
        .collect();
    let eligible = if fresh.is_empty() { pool.to_vec() } else { fresh };

    let best = eligible.iter().map(|i| rank(*i)).max()?;
    let tied: Vec<&'c Item> = eligible.into_iter().filter(|i| rank(*i) == best).collect();
    tied.choose(session.rng()).copied()
}

/// Layer for an outfit anchored on `anchor` tags. Tries, in order: a
/// requested kind sharing a tag with the anchor, any requested kind, any
/// layer sharing a tag, then any layer at all.
pub fn choose_layer<'c>(
    layers: &[&'c Item],
    kinds: &[&str],
    anchor: &BTreeSet<String>,
    scores: &ScoreBoard,
    session: &mut SessionState,
) -> Option<&'c Item> {
    let of_kind = |i: &Item| kinds.iter().any(|k| i.has_tag(k));
    let in_tier = |tier: usize, i: &Item| match tier {
        0 => of_kind(i) && i.shares_tag_with(anchor),
        1 => of_kind(i),
        2 => i.shares_tag_with(anchor),
        _ => true,
    };
    for tier in 0..4 {
        let pool: Vec<&'c Item> = layers.iter().copied().filter(|i| in_tier(tier, *i)).collect();
        if let Some(layer) = pick_best(&pool, |i| scores.get(&i.id), session) {
            return Some(layer);
        }
    }
    None
}

/// A layer goes on when asked for or when the weather calls for one, but
/// never when the prompt ruled layers out
pub fn wants_layer(reqs: &RequirementSet, ctx: &Context) -> bool {
    !reqs.forbids("layer") && (reqs.requires("layer") || ctx.needs_layer)
}

/// Outfits assembled so far for one request, with the ids they use
#[derive(Debug, Clone, Default)]
pub struct OutfitBatch {
    outfits: Vec<Outfit>,
    used: HashSet<String>,
}

impl OutfitBatch {
    pub fn is_full(&self) -> bool {
        self.outfits.len() >= MAX_OUTFITS
    }

    pub fn len(&self) -> usize {
        self.outfits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }

    pub fn outfits(&self) -> &[Outfit] {
        &self.outfits
    }

    pub fn outfits_mut(&mut self) -> &mut [Outfit] {
        &mut self.outfits
    }

    /// Whether `item` already sits in a top, bottom or one-piece slot.
    /// Layers may repeat across outfits.
    pub fn uses(&self, item: &Item) -> bool {
        item.category != Category::Layer && self.used.contains(&item.id)
    }

    /// Whether any non-layer item of `outfit` is already used
    pub fn collides(&self, outfit: &Outfit) -> bool {
        outfit.items.iter().any(|i| self.uses(i))
    }

    /// Append unless full or colliding. Returns whether it was added.
    pub fn push(&mut self, outfit: Outfit) -> bool {
        if self.is_full() || self.collides(&outfit) {
            return false;
        }
        self.used.extend(outfit.items.iter().map(|i| i.id.clone()));
        self.outfits.push(outfit);
        true
    }

    /// Put an outfit at the front, evicting the last one when full
    pub fn push_front(&mut self, outfit: Outfit) -> bool {
        if self.collides(&outfit) {
            return false;
        }
        if self.is_full() {
            if let Some(evicted) = self.outfits.pop() {
                for item in &evicted.items {
                    self.used.remove(&item.id);
                }
            }
        }
        self.used.extend(outfit.items.iter().map(|i| i.id.clone()));
        self.outfits.insert(0, outfit);
        true
    }

    pub fn into_outfits(self) -> Vec<Outfit> {
        self.outfits
    }
}

/// Build an outfit record, scoring it from the board plus the pair color bonus
pub fn make_outfit(kind: &str, items: Vec<&Item>, reason: String, scores: &ScoreBoard) -> Outfit {
    let items: Vec<Item> = items.into_iter().cloned().collect();
    let mut score = scores.total(&items);
    let top = items.iter().find(|i| i.category == Category::Topwear);
    let bottom = items.iter().find(|i| i.category == Category::Bottomwear);
    if let (Some(top), Some(bottom)) = (top, bottom) {
        score += color::pair_score(top, bottom);
    }
    Outfit {
        kind: kind.to_string(),
        color_harmony: color::classify(&items),
        items,
        reason,
        score,
    }
}

/// Composition label for a base kind plus an optional layer, e.g.
/// `top+bottom` and `top+bottom+layer`
pub fn with_layer_suffix(kind: &str, has_layer: bool) -> String {
    if has_layer {
        format!("{kind}+layer")
    } else {
        kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::UserPreferences;
    use crate::scoring::ScoreInputs;

    fn item(id: &str, category: Category, tags: &[&str]) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: String::new(),
        }
    }

    fn board(items: &[&Item]) -> ScoreBoard {
        let reqs = RequirementSet::default();
        let ctx = Context::new(TimeOfDay::Morning, Season::Autumn, Weather::Pleasant);
        let occasions = Occasions::single("party");
        let prefs = UserPreferences::default();
        ScoreBoard::build(
            items.iter().copied(),
            &ScoreInputs {
                requirements: &reqs,
                context: &ctx,
                occasions: &occasions,
                preferences: &prefs,
            },
        )
    }

    fn pair(top: &Item, bottom: &Item) -> Outfit {
        make_outfit("top+bottom", vec![top, bottom], String::new(), &ScoreBoard::default())
    }

    #[test]
    fn test_pick_best_prefers_highest_score() {
        let a = item("a", Category::Topwear, &["party"]);
        let b = item("b", Category::Topwear, &["cotton"]);
        let scores = board(&[&a, &b]);
        let mut session = SessionState::new(5, Some(3));
        for _ in 0..10 {
            let picked = pick_best(&[&a, &b], |i| scores.get(&i.id), &mut session).unwrap();
            assert_eq!(picked.id, "a");
        }
    }

    #[test]
    fn test_pick_best_avoids_recent_items() {
        let a = item("a", Category::Topwear, &["party"]);
        let b = item("b", Category::Topwear, &["cotton"]);
        let bottom = item("z", Category::Bottomwear, &[]);
        let scores = board(&[&a, &b]);
        let mut session = SessionState::new(5, Some(3));
        session.record_batch("k", &[pair(&a, &bottom)]);

        let picked = pick_best(&[&a, &b], |i| scores.get(&i.id), &mut session).unwrap();
        assert_eq!(picked.id, "b");

        // everything recent: fall back to the full pool
        let picked = pick_best(&[&a], |i| scores.get(&i.id), &mut session).unwrap();
        assert_eq!(picked.id, "a");
        assert!(pick_best(&[], |_| 0, &mut session).is_none());
    }

    #[test]
    fn test_pick_best_tie_break_is_seeded() {
        let items: Vec<Item> = (0..6)
            .map(|n| item(&format!("i{n}"), Category::Topwear, &[]))
            .collect();
        let pool: Vec<&Item> = items.iter().collect();
        let run = |seed| {
            let mut session = SessionState::new(5, Some(seed));
            (0..5)
                .map(|_| pick_best(&pool, |_| 0, &mut session).unwrap().id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_choose_layer_tiers() {
        let blazer = item("l1", Category::Layer, &["blazer", "office"]);
        let party_blazer = item("l2", Category::Layer, &["blazer", "party"]);
        let party_wrap = item("l3", Category::Layer, &["wrap", "party"]);
        let plain = item("l4", Category::Layer, &["wool"]);
        let layers = [&blazer, &party_blazer, &party_wrap, &plain];
        let scores = ScoreBoard::default();
        let mut session = SessionState::new(5, Some(1));
        let anchor: BTreeSet<String> = ["party".to_string()].into_iter().collect();

        let pick = |kinds: &[&str], anchor: &BTreeSet<String>, session: &mut SessionState| {
            choose_layer(&layers, kinds, anchor, &scores, session).map(|l| l.id.clone())
        };

        assert_eq!(pick(&["blazer"], &anchor, &mut session).as_deref(), Some("l2"));
        let office: BTreeSet<String> = ["office".to_string()].into_iter().collect();
        assert_eq!(pick(&["wrap"], &office, &mut session).as_deref(), Some("l3"));
        let none: BTreeSet<String> = ["silk".to_string()].into_iter().collect();
        assert_eq!(pick(&[], &office, &mut session).as_deref(), Some("l1"));
        assert!(pick(&[], &none, &mut session).is_some());
        assert!(choose_layer(&[], &["blazer"], &anchor, &scores, &mut session).is_none());
    }

    #[test]
    fn test_wants_layer() {
        let cold = Context::new(TimeOfDay::Night, Season::Winter, Weather::Cold);
        let mild = Context::new(TimeOfDay::Night, Season::Autumn, Weather::Pleasant);
        let mut reqs = RequirementSet::default();
        assert!(wants_layer(&reqs, &cold));
        assert!(!wants_layer(&reqs, &mild));
        reqs.required.insert("layer".to_string());
        assert!(wants_layer(&reqs, &mild));

        let mut no_layer = RequirementSet::default();
        no_layer.forbidden.insert("layer".to_string());
        assert!(!wants_layer(&no_layer, &cold));
    }

    #[test]
    fn test_batch_uniqueness_and_cap() {
        let tops: Vec<Item> = (0..4).map(|n| item(&format!("t{n}"), Category::Topwear, &[])).collect();
        let bottoms: Vec<Item> = (0..4).map(|n| item(&format!("b{n}"), Category::Bottomwear, &[])).collect();
        let mut batch = OutfitBatch::default();

        assert!(batch.push(pair(&tops[0], &bottoms[0])));
        assert!(!batch.push(pair(&tops[0], &bottoms[1])));
        assert!(batch.push(pair(&tops[1], &bottoms[1])));
        assert!(batch.push(pair(&tops[2], &bottoms[2])));
        assert!(batch.is_full());
        assert!(!batch.push(pair(&tops[3], &bottoms[3])));

        let dress = item("d", Category::OnePiece, &[]);
        let solo = make_outfit("one_piece", vec![&dress], String::new(), &ScoreBoard::default());
        assert!(batch.push_front(solo));
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.outfits()[0].kind, "one_piece");
        // the evicted pair's items are free again
        assert!(!batch.uses(&tops[2]));
    }

    #[test]
    fn test_make_outfit_scores_pair_colors() {
        let top = item("t", Category::Topwear, &["red", "party"]);
        let bottom = item("b", Category::Bottomwear, &["green"]);
        let scores = board(&[&top, &bottom]);
        let outfit = make_outfit("top+bottom", vec![&top, &bottom], "r".into(), &scores);
        assert_eq!(outfit.score, 50 + color::COMPLEMENTARY_BONUS);
        assert_eq!(outfit.color_harmony, ColorHarmony::Complementary);
        assert_eq!(with_layer_suffix("one_piece", true), "one_piece+layer");
    }
}
