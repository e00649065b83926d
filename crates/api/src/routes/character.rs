use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /                           -> list
/// POST   /                           -> create
/// GET    /{id}                       -> get_by_id
/// PUT    /{id}                       -> update
/// DELETE /{id}                       -> delete
/// GET    /{id}/age                   -> age
/// GET    /nationalId/{national_id}   -> get_by_national_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::list).post(character::create))
        .route(
            "/{id}",
            get(character::get_by_id)
                .put(character::update)
                .delete(character::delete),
        )
        .route("/{id}/age", get(character::age))
        .route(
            "/nationalId/{national_id}",
            get(character::get_by_national_id),
        )
}
