//! Movie entity model and DTOs.

use casting_core::error::CoreError;
use casting_core::patch::{PatchSemantics, RequestBody};
use casting_core::release_date::parse_release_date;
use casting_core::types::{DbId, ReleaseDate};
use casting_core::validation::validate_title;
use serde::Serialize;
use sqlx::FromRow;

/// A movie row from the `movies` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub release_date: ReleaseDate,
}

/// DTO for creating a new movie. Both fields are required.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMovie {
    pub title: String,
    pub release_date: ReleaseDate,
}

impl CreateMovie {
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["title", "release_date"];

    /// Build from a request body, rejecting it if any required field is absent.
    pub fn from_body(body: &RequestBody) -> Result<Self, CoreError> {
        let missing = body.missing(Self::REQUIRED_FIELDS);
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let title: String = body.required("title")?;
        validate_title(&title)?;
        let raw_date: String = body.required("release_date")?;
        let release_date = parse_release_date(&raw_date)?;

        Ok(Self {
            title,
            release_date,
        })
    }
}

/// DTO for updating an existing movie. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub release_date: Option<ReleaseDate>,
}

impl UpdateMovie {
    pub const FIELDS: &'static [&'static str] = &["title", "release_date"];

    /// Build from a request body that must name at least one mutable field.
    pub fn from_body(body: &RequestBody, semantics: PatchSemantics) -> Result<Self, CoreError> {
        if !body.contains_any(Self::FIELDS) {
            return Err(CoreError::Validation(format!(
                "Request body must contain at least one of: {}",
                Self::FIELDS.join(", ")
            )));
        }

        let title: Option<String> = body.optional("title", semantics)?;
        if let Some(title) = &title {
            validate_title(title)?;
        }
        let release_date = body
            .optional::<String>("release_date", semantics)?
            .map(|raw| parse_release_date(&raw))
            .transpose()?;

        Ok(Self {
            title,
            release_date,
        })
    }

    /// True when applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.release_date.is_none()
    }

    /// Apply the present fields to `movie` in place.
    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(release_date) = self.release_date {
            movie.release_date = release_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn body(value: serde_json::Value) -> RequestBody {
        RequestBody::from_value(value).unwrap()
    }

    #[test]
    fn create_requires_both_fields() {
        let err = CreateMovie::from_body(&body(json!({"title": "Dummy"}))).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("release_date"));
    }

    #[test]
    fn create_parses_release_date() {
        let input =
            CreateMovie::from_body(&body(json!({"title": "Dummy", "release_date": "2022-01-15"})))
                .unwrap();
        assert_eq!(input.title, "Dummy");
        assert_eq!(input.release_date.to_string(), "2022-01-15 00:00:00");
    }

    #[test]
    fn create_rejects_blank_title() {
        let err = CreateMovie::from_body(&body(json!({"title": " ", "release_date": "2022-01-15"})))
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn update_needs_a_known_field() {
        let err =
            UpdateMovie::from_body(&body(json!({"director": "Cameron"})), PatchSemantics::Presence)
                .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn update_skip_falsy_ignores_empty_title() {
        let update = UpdateMovie::from_body(&body(json!({"title": ""})), PatchSemantics::SkipFalsy)
            .unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn update_presence_rejects_empty_title() {
        let err = UpdateMovie::from_body(&body(json!({"title": ""})), PatchSemantics::Presence)
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut movie = Movie {
            id: 1,
            title: "Titanic".into(),
            release_date: parse_release_date("1997-12-19").unwrap(),
        };
        let update = UpdateMovie {
            title: Some("Titanic (Remastered)".into()),
            release_date: None,
        };
        update.apply_to(&mut movie);
        assert_eq!(movie.title, "Titanic (Remastered)");
        assert_eq!(movie.release_date.to_string(), "1997-12-19 00:00:00");
    }
}
