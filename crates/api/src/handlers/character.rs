//! Handlers for the `/characters` resource.
//!
//! Bodies and responses use camelCase keys; see [`crate::dto`].

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roster_core::error::CoreError;
use roster_core::types::{DbId, NationalId};
use roster_db::models::character::{Character, CharacterData};

use crate::dto::{CharacterAgeResponse, CharacterRequest, CharacterResponse, ListParams};
use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

fn into_data(input: CharacterRequest) -> Result<CharacterData, AppError> {
    CharacterData::try_from(input).map_err(|fields| AppError::Core(CoreError::Validation(fields)))
}

fn to_responses(characters: Vec<Character>) -> Vec<CharacterResponse> {
    characters.into_iter().map(CharacterResponse::from).collect()
}

/// POST /api/characters
///
/// Responds `201` with the stored character and a `Location` header.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CharacterRequest>,
) -> AppResult<impl IntoResponse> {
    let data = into_data(input)?;
    let character = state.characters.insert(&data).await?;
    let location = format!("/api/characters/{}", character.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(CharacterResponse::from(character)),
    ))
}

/// GET /api/characters[?bornAfter=YYYY-MM-DD | ?name=fragment]
///
/// Without filters returns every character. The two filters cannot be
/// combined.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<Vec<CharacterResponse>>> {
    let characters = match (params.born_after, params.name) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "bornAfter and name filters cannot be combined".to_string(),
            ))
        }
        (Some(date), None) => state.characters.list_born_after(date).await?,
        (None, Some(fragment)) => state.characters.search_by_name(&fragment).await?,
        (None, None) => state.characters.list_all().await?,
    };
    Ok(Json(to_responses(characters)))
}

/// GET /api/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<CharacterResponse>> {
    let character = state.characters.get_by_id(id).await?;
    Ok(Json(character.into()))
}

/// GET /api/characters/nationalId/{national_id}
pub async fn get_by_national_id(
    State(state): State<AppState>,
    AppPath(national_id): AppPath<NationalId>,
) -> AppResult<Json<CharacterResponse>> {
    let character = state.characters.get_by_national_id(national_id).await?;
    Ok(Json(character.into()))
}

/// PUT /api/characters/{id}
///
/// Full replacement of the stored fields; the id always comes from the path.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<CharacterRequest>,
) -> AppResult<Json<CharacterResponse>> {
    let data = into_data(input)?;
    let character = state.characters.update(id, &data).await?;
    Ok(Json(character.into()))
}

/// DELETE /api/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    state.characters.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/characters/{id}/age
pub async fn age(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<CharacterAgeResponse>> {
    let age = state.characters.get_age(id).await?;
    let name = state.characters.get_name(id).await?;
    Ok(Json(CharacterAgeResponse { name, age }))
}
