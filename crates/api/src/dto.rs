//! Request and response bodies for the `/api/characters` resource.
//!
//! Conversions to and from the storage model are written out by hand.

use chrono::NaiveDate;
use roster_core::types::{DbId, NationalId};
use roster_core::validation::{not_blank, FieldErrors};
use roster_db::models::character::{Character, CharacterData};
use serde::{Deserialize, Serialize};
use validator::Validate;

const REQUIRED: &str = "must be provided";

/// Body of `POST /api/characters` and `PUT /api/characters/{id}`.
///
/// Every field is optional at the serde level so a missing field produces a
/// field-keyed validation message rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRequest {
    #[validate(
        required(message = "must be provided"),
        range(min = 1, message = "must be a positive number")
    )]
    pub national_id: Option<NationalId>,

    #[validate(
        required(message = "must be provided"),
        custom(function = "not_blank", message = "must not be blank")
    )]
    pub name: Option<String>,

    #[validate(required(message = "must be provided"))]
    pub birth_date: Option<NaiveDate>,

    #[validate(
        required(message = "must be provided"),
        custom(function = "not_blank", message = "must not be blank")
    )]
    pub series: Option<String>,
}

impl TryFrom<CharacterRequest> for CharacterData {
    type Error = FieldErrors;

    fn try_from(req: CharacterRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        if req.national_id.is_none() {
            errors.insert("nationalId", REQUIRED);
        }
        if req.name.is_none() {
            errors.insert("name", REQUIRED);
        }
        if req.birth_date.is_none() {
            errors.insert("birthDate", REQUIRED);
        }
        if req.series.is_none() {
            errors.insert("series", REQUIRED);
        }

        match (req.national_id, req.name, req.birth_date, req.series) {
            (Some(national_id), Some(name), Some(birth_date), Some(series)) => Ok(CharacterData {
                national_id,
                name,
                birth_date,
                series,
            }),
            _ => Err(errors),
        }
    }
}

/// A character as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    pub id: DbId,
    pub national_id: NationalId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub series: String,
}

impl From<Character> for CharacterResponse {
    fn from(c: Character) -> Self {
        Self {
            id: c.id,
            national_id: c.national_id,
            name: c.name,
            birth_date: c.birth_date,
            series: c.series,
        }
    }
}

/// Body of `GET /api/characters/{id}/age`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterAgeResponse {
    pub name: String,
    pub age: i32,
}

/// Optional filters for `GET /api/characters`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Only characters born strictly after this date.
    pub born_after: Option<NaiveDate>,
    /// Only characters whose name contains this fragment (case-sensitive).
    pub name: Option<String>,
}
