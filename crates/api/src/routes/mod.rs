pub mod character;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /characters                          list (optional filters), create
/// /characters/{id}                     get, update, delete
/// /characters/{id}/age                 name and age
/// /characters/nationalId/{national_id} lookup by national id
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/characters", character::router())
}
