//! Recommendation facade: prompt in, scored outfit batch out

use crate::catalog::Catalog;
use crate::error::{Result, StylistError};
use crate::filter;
use crate::occasion;
use crate::preferences::{PreferenceStore, UserPreferences};
use crate::requirements;
use crate::scoring::{ScoreBoard, ScoreInputs};
use crate::selection::{OutfitBatch, Pools};
use crate::session::{context_key, SessionState};
use crate::strategies::{self, Assembly, OutfitStrategy};
use crate::types::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Owns the catalog, the session state and the user's preferences
pub struct Recommender {
    catalog: Catalog,
    session: SessionState,
    preferences: UserPreferences,
    store: Option<PreferenceStore>,
    strategies: Vec<Box<dyn OutfitStrategy>>,
}

impl Recommender {
    /// Recommender without a preference file; learned preferences live in memory
    pub fn new(catalog: Catalog, session: SessionState) -> Self {
        Self {
            catalog,
            session,
            preferences: UserPreferences::default(),
            store: None,
            strategies: strategies::registry(),
        }
    }

    /// Load preferences from `store` now and write them back on every confirmation
    pub fn with_store(mut self, store: PreferenceStore) -> Self {
        self.preferences = store.load();
        info!(
            "Preferences from {}: {} colors, {} styles, {} fabrics",
            store.path().display(),
            self.preferences.preferred_colors.len(),
            self.preferences.preferred_styles.len(),
            self.preferences.preferred_fabrics.len()
        );
        self.store = Some(store);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Recommend for the current local time
    pub fn recommend(&mut self, prompt: &str) -> Recommendation {
        self.recommend_at(prompt, Context::now())
    }

    /// Recommend under an explicit context
    pub fn recommend_at(&mut self, prompt: &str, context: Context) -> Recommendation {
        let start = Instant::now();
        info!("Recommending for prompt='{}'", prompt);

        // Step 1: Classify and extract
        let occasions = occasion::classify(prompt);
        let reqs = requirements::extract(prompt);
        let relaxed = reqs.relaxed();
        info!(
            "Occasions: {} (required={:?}, preferred={:?}, forbidden={:?})",
            occasions, reqs.required, reqs.preferred, reqs.forbidden
        );

        // Step 2: Score the whole catalog once
        let scores = ScoreBoard::build(
            self.catalog.items(),
            &ScoreInputs {
                requirements: &reqs,
                context: &context,
                occasions: &occasions,
                preferences: &self.preferences,
            },
        );

        // Step 3: Filter and run the occasion strategy
        let shown_key = context_key(&occasions, &context);
        let mut asm = Assembly {
            catalog: &self.catalog,
            pools: Pools::partition(filter::candidates(&self.catalog, &occasions, &reqs)),
            occasions: &occasions,
            requirements: &reqs,
            context: &context,
            scores: &scores,
            session: &mut self.session,
            shown_key: &shown_key,
            batch: OutfitBatch::default(),
        };
        let strategy = strategies::dispatch(&self.strategies, &mut asm);
        info!("Strategy '{}' built {} outfits", strategy, asm.batch.len());

        // Step 4: Relax hard requirements for under-filled, non-formal requests
        if !asm.batch.is_full() && !strategies::is_relaxation_exempt(&occasions) {
            debug!("Relaxing requirements {:?}", reqs.required);
            let batch = std::mem::take(&mut asm.batch);
            asm = Assembly {
                pools: Pools::partition(filter::candidates(&self.catalog, &occasions, &relaxed)),
                requirements: &relaxed,
                batch,
                ..asm
            };
            let before = asm.batch.len();
            strategies::dispatch(&self.strategies, &mut asm);
            info!("Relaxation added {} outfits", asm.batch.len().saturating_sub(before));
        }

        // Step 5: Honor explicit layer requests
        strategies::attach_requested_layers(&mut asm, &reqs);

        let outfits = asm.batch.into_outfits();

        // Step 6: Remember what was shown
        self.session.record_batch(&shown_key, &outfits);

        if outfits.is_empty() {
            warn!("No outfits found for '{}'", prompt);
        }
        info!(
            "Recommended {} outfits for {} in {:?}",
            outfits.len(),
            occasions,
            start.elapsed()
        );

        Recommendation {
            occasion: occasions.joined(),
            outfits,
            context,
        }
    }

    /// Learn from an explicitly chosen outfit and persist the result
    pub fn confirm(&mut self, item_ids: &[String]) -> Result<&UserPreferences> {
        let items = item_ids
            .iter()
            .map(|id| {
                self.catalog
                    .get(id)
                    .cloned()
                    .ok_or_else(|| StylistError::UnknownItem(id.clone()))
            })
            .collect::<Result<Vec<Item>>>()?;

        let outfit = Outfit {
            kind: "confirmed".to_string(),
            color_harmony: crate::color::classify(&items),
            items,
            reason: String::new(),
            score: 0,
        };
        self.preferences.learn_from(&outfit);
        debug!("Preferences now {:?}", self.preferences);

        if let Some(store) = &self.store {
            store.save(&self.preferences)?;
        }
        Ok(&self.preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn recommender() -> Recommender {
        Recommender::new(Catalog::builtin().unwrap(), SessionState::new(5, Some(9)))
    }

    fn autumn_morning() -> Context {
        Context::new(TimeOfDay::Morning, Season::Autumn, Weather::Pleasant)
    }

    #[test]
    fn test_occasion_label_is_joined() {
        let mut rec = recommender();
        let result = rec.recommend_at("office ethnic day", autumn_morning());
        assert_eq!(result.occasion, "office & ethnic");
        assert!(!result.outfits.is_empty());
    }

    #[test]
    fn test_confirm_unknown_item_is_error() {
        let mut rec = recommender();
        let err = rec.confirm(&["nope".to_string()]).unwrap_err();
        assert!(matches!(err, StylistError::UnknownItem(id) if id == "nope"));
        assert_eq!(rec.preferences(), &UserPreferences::default());
    }

    #[test]
    fn test_confirm_learns_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        let mut rec = recommender().with_store(store.clone());

        let result = rec.recommend_at("party", autumn_morning());
        let ids: Vec<String> = result.outfits[0].items.iter().map(|i| i.id.clone()).collect();
        rec.confirm(&ids).unwrap();

        assert!(!rec.preferences().preferred_categories.is_empty());
        assert_eq!(&store.load(), rec.preferences());
    }

    /// Adds at most one pair per run from the filtered pools
    struct OnePairPerRun(Arc<AtomicUsize>);

    impl OutfitStrategy for OnePairPerRun {
        fn name(&self) -> &'static str {
            "one_pair"
        }

        fn applies(&self, _occasions: &Occasions) -> bool {
            true
        }

        fn build(&self, asm: &mut Assembly<'_>) {
            self.0.fetch_add(1, Ordering::SeqCst);
            let pools = asm.pools.clone();
            asm.add_pairs("top+bottom", &pools, 1, "one pair");
        }
    }

    fn two_color_wardrobe() -> Catalog {
        let item = |id: &str, category, tags: &[&str]| Item {
            id: id.to_string(),
            name: id.to_string(),
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: String::new(),
        };
        Catalog::new(vec![
            item("t1", Category::Topwear, &["office", "picnic", "red"]),
            item("t2", Category::Topwear, &["office", "picnic", "blue"]),
            item("b1", Category::Bottomwear, &["office", "picnic", "red"]),
            item("b2", Category::Bottomwear, &["office", "picnic", "blue"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_formal_requests_skip_relaxation() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut rec = Recommender::new(two_color_wardrobe(), SessionState::new(5, Some(1)));
        rec.strategies = vec![Box::new(OnePairPerRun(runs.clone()))];

        // Only the red pair meets the requirement; office keeps it strict
        let office = rec.recommend_at("office in red", autumn_morning());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(office.outfits.len(), 1);
        assert!(office.outfits[0].items.iter().all(|i| i.has_tag("red")));

        // A picnic gets a second pass without the color requirement
        runs.store(0, Ordering::SeqCst);
        let picnic = rec.recommend_at("picnic in red", autumn_morning());
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(picnic.outfits.len(), 2);
        assert!(picnic.outfits[1].items.iter().all(|i| i.has_tag("blue")));
    }
}
