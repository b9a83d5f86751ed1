pub mod handlers;
pub mod routes;

use scholar_db::PgContributionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: PgContributionStore,
}
