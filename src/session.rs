//! Session-scoped state: recent-usage rings, shown pairs and the RNG

use crate::types::{Category, Context, Occasions, Outfit};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

pub const DEFAULT_RECENT_CAPACITY: usize = 5;
pub const MIN_RECENT_CAPACITY: usize = 3;
pub const MAX_RECENT_CAPACITY: usize = 10;

/// Top+bottom pairs remembered per context key
pub const SHOWN_PAIRS_CAPACITY: usize = 10;

/// Fixed-capacity FIFO ring of ids
#[derive(Debug, Clone)]
pub struct Ring<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T: PartialEq> Ring<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append, evicting the oldest entry at capacity. A value already present
    /// moves to the back.
    pub fn push(&mut self, value: T) {
        if let Some(pos) = self.entries.iter().position(|v| *v == value) {
            self.entries.remove(pos);
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(value);
    }

    pub fn contains(&self, value: &T) -> bool {
        self.entries.contains(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

/// Mutable state carried across requests for one user
#[derive(Debug)]
pub struct SessionState {
    rng: StdRng,
    recent_capacity: usize,
    recent: HashMap<Category, Ring<String>>,
    shown: HashMap<String, Ring<(String, String)>>,
}

impl SessionState {
    /// `recent_capacity` is clamped to 3..=10. Without a seed the RNG is
    /// seeded from OS entropy.
    pub fn new(recent_capacity: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            recent_capacity: recent_capacity.clamp(MIN_RECENT_CAPACITY, MAX_RECENT_CAPACITY),
            recent: HashMap::new(),
            shown: HashMap::new(),
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn recent_capacity(&self) -> usize {
        self.recent_capacity
    }

    pub fn is_recent(&self, category: Category, id: &str) -> bool {
        self.recent
            .get(&category)
            .is_some_and(|ring| ring.iter().any(|r| r == id))
    }

    pub fn was_shown(&self, key: &str, top: &str, bottom: &str) -> bool {
        self.shown
            .get(key)
            .is_some_and(|ring| ring.contains(&(top.to_string(), bottom.to_string())))
    }

    /// Remember every item and top+bottom pair of a delivered batch
    pub fn record_batch(&mut self, key: &str, outfits: &[Outfit]) {
        let capacity = self.recent_capacity;
        for outfit in outfits {
            for item in &outfit.items {
                self.recent
                    .entry(item.category)
                    .or_insert_with(|| Ring::new(capacity))
                    .push(item.id.clone());
            }
            if let (Some(top), Some(bottom)) = (
                outfit.item_in(Category::Topwear),
                outfit.item_in(Category::Bottomwear),
            ) {
                self.shown
                    .entry(key.to_string())
                    .or_insert_with(|| Ring::new(SHOWN_PAIRS_CAPACITY))
                    .push((top.id.clone(), bottom.id.clone()));
            }
        }
        debug!("Recorded {} outfits under {}", outfits.len(), key);
    }
}

/// Key for the shown-combination cache: `occasion|time|weather`
pub fn context_key(occasions: &Occasions, ctx: &Context) -> String {
    format!(
        "{}|{}|{}",
        occasions.joined(),
        ctx.time_of_day.as_str(),
        ctx.weather.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorHarmony, Item, Season, TimeOfDay, Weather};

    fn item(id: &str, category: Category) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            category,
            tags: Default::default(),
            image: String::new(),
        }
    }

    fn pair(top: &str, bottom: &str) -> Outfit {
        Outfit {
            kind: "top+bottom".to_string(),
            items: vec![item(top, Category::Topwear), item(bottom, Category::Bottomwear)],
            reason: String::new(),
            score: 0,
            color_harmony: ColorHarmony::Stylish,
        }
    }

    #[test]
    fn test_ring_evicts_oldest() {
        let mut ring = Ring::new(3);
        for id in ["a", "b", "c", "d"] {
            ring.push(id);
        }
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec!["b", "c", "d"]);

        ring.push("b");
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec!["c", "d", "b"]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_capacity_is_clamped() {
        assert_eq!(SessionState::new(1, Some(1)).recent_capacity(), MIN_RECENT_CAPACITY);
        assert_eq!(SessionState::new(50, Some(1)).recent_capacity(), MAX_RECENT_CAPACITY);
        assert_eq!(SessionState::new(7, Some(1)).recent_capacity(), 7);
    }

    #[test]
    fn test_record_batch_tracks_items_and_pairs() {
        let mut session = SessionState::new(3, Some(7));
        let batch: Vec<Outfit> = (0..4).map(|i| pair(&format!("t{i}"), &format!("b{i}"))).collect();
        session.record_batch("party|evening|cold", &batch);

        assert!(!session.is_recent(Category::Topwear, "t0"));
        for id in ["t1", "t2", "t3"] {
            assert!(session.is_recent(Category::Topwear, id));
        }
        assert!(session.is_recent(Category::Bottomwear, "b3"));
        assert!(!session.is_recent(Category::Bottomwear, "b0"));
        assert!(session.was_shown("party|evening|cold", "t0", "b0"));
        assert!(!session.was_shown("party|night|cold", "t0", "b0"));
    }

    #[test]
    fn test_context_key_format() {
        let ctx = Context::new(TimeOfDay::Night, Season::Autumn, Weather::Pleasant);
        let occasions = Occasions::new(vec!["office".into(), "ethnic".into()]);
        assert_eq!(context_key(&occasions, &ctx), "office & ethnic|night|pleasant");
    }
}
