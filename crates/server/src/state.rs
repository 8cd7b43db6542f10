use database::repository::TimetableRepository;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn TimetableRepository>,
    pub max_query_span_days: i64,
}

impl AppState {
    pub fn new(repository: Arc<dyn TimetableRepository>, max_query_span_days: i64) -> Self {
        Self {
            repository,
            max_query_span_days,
        }
    }
}
