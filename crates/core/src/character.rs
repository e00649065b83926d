//! Character domain rules shared by the service and storage layers.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;
use crate::validation::FieldErrors;

/// Entity name used in not-found and conflict messages.
pub const ENTITY: &str = "Character";

/// Wire name of the national id field, used in lookup errors.
pub const NATIONAL_ID_FIELD: &str = "nationalId";

/// Age of someone born on `birth_date` as of calendar year `year`.
///
/// Only the years are compared: a character born on 1925-12-31 is 98 for
/// the whole of 2023.
pub fn age_in_year(birth_date: NaiveDate, year: i32) -> i32 {
    year - birth_date.year()
}

/// Age as of `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    age_in_year(birth_date, today.year())
}

/// Reject birth dates later than `today`.
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if birth_date > today {
        return Err(CoreError::Validation(FieldErrors::single(
            "birthDate",
            "must not be in the future",
        )));
    }
    Ok(())
}

/// Message returned when a national id is already registered.
pub fn duplicate_national_id_message(national_id: i64) -> String {
    format!("{ENTITY} with {NATIONAL_ID_FIELD} {national_id} is already registered")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_ignores_month_and_day() {
        assert_eq!(age_in_year(date(1925, 1, 1), 2023), 98);
        assert_eq!(age_in_year(date(1925, 12, 31), 2023), 98);
        assert_eq!(age_on(date(1925, 12, 31), date(2023, 1, 1)), 98);
    }

    #[test]
    fn age_in_birth_year_is_zero() {
        assert_eq!(age_on(date(2020, 6, 1), date(2020, 1, 1)), 0);
    }

    #[test]
    fn birth_date_today_is_accepted() {
        assert!(validate_birth_date(date(2023, 5, 4), date(2023, 5, 4)).is_ok());
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let err = validate_birth_date(date(2023, 5, 5), date(2023, 5, 4)).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref fields) if fields.get("birthDate").is_some());
    }
}
