use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::warn;

use crate::matching::{MatchContext, MatchPolicy};
use crate::records::RecordStore;

/// Placeholder policy that picks one known key without looking at the image.
///
/// NOT a classifier. The answer depends only on the seed and the number of
/// candidate regions, never on what the regions contain. Use it to run the
/// pipeline end to end before reference descriptors exist.
#[derive(Debug, Clone)]
pub struct StubPolicy {
    keys: Vec<String>,
    seed: u64,
}

impl StubPolicy {
    pub fn new(keys: impl IntoIterator<Item = String>) -> Self {
        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();
        Self { keys, seed: 0 }
    }

    pub fn from_store(store: &RecordStore) -> Self {
        Self::new(store.keys().map(str::to_string))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl MatchPolicy for StubPolicy {
    fn match_regions(&self, context: &MatchContext<'_>) -> Option<String> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ context.regions().len() as u64);
        let key = self.keys.choose(&mut rng)?;
        warn!("Stub policy picked '{}' without inspecting the regions", key);
        Some(key.clone())
    }

    fn name(&self) -> &str {
        "Stub Match"
    }
}
