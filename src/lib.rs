pub mod db;
pub mod extractors;
pub mod generation;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;

use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub generator: generation::GenerationClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(names::EXAMS_API_PREFIX, handlers::exam::routes())
        .with_state(state)
}
