use crate::config::SeedMode;
use crate::drafts::Drafts;
use crate::store::Portal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub seed: SeedMode,
    pub portal: Portal,
    pub drafts: Drafts,
}

impl AppState {
    pub fn new(seed: SeedMode) -> Self {
        Self {
            seed,
            portal: seed.load(),
            drafts: Drafts::default(),
        }
    }

    /// Back to the seeded collections, as if the sidecar had been restarted.
    pub fn reset(&mut self) {
        self.portal = self.seed.load();
        self.drafts.clear();
    }
}
