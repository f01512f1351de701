pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;

use crate::config::AppConfig;
use crate::services::category_service::CategoryService;
use crate::services::flashcard_service::FlashcardService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub flashcards: Arc<FlashcardService>,
    pub categories: Arc<CategoryService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::handlers::flashcards::index))
        .route(
            "/add",
            get(api::handlers::flashcards::show_add_form)
                .post(api::handlers::flashcards::add_flashcard),
        )
        .route("/study", get(api::handlers::flashcards::study))
        .route(
            "/study/category/:id",
            get(api::handlers::flashcards::study_by_category),
        )
        .route(
            "/delete/:id",
            get(api::handlers::flashcards::delete_flashcard),
        )
        .route(
            "/randomize-images",
            get(api::handlers::flashcards::randomize_images),
        )
        .route(
            "/categories",
            get(api::handlers::categories::list_categories),
        )
        .route(
            "/categories/add",
            post(api::handlers::categories::add_category),
        )
        .nest_service("/images", ServeDir::new(&state.config.upload_dir))
        .layer(DefaultBodyLimit::max(
            state.config.max_upload_size + 1024 * 1024, // buffer for multipart overhead
        ))
        .with_state(state)
}
