/// Shared application state handed to every endpoint
use crate::catalog::CatalogStore;
use crate::config::PlannerConfig;
use crate::ratings::RatingsClient;
use crate::schedule::ScheduleStore;

/// State shared across the server: the read-only catalog, the user's
/// schedule, and the ratings client with its caches.
pub struct AppState {
    pub config: PlannerConfig,
    pub catalog: CatalogStore,
    pub schedule: ScheduleStore,
    pub ratings: RatingsClient,
}
