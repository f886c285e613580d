use crate::llm::LlmAdapter;
use crate::observability::metrics::Metrics;
use crate::store::SqliteStore;

pub struct AppState {
    pub store: SqliteStore,
    pub llm: LlmAdapter,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: SqliteStore, llm: LlmAdapter) -> Self {
        Self {
            store,
            llm,
            metrics: Metrics::new(),
        }
    }
}
