//! Actor entity model and DTOs.

use casting_core::error::CoreError;
use casting_core::patch::{PatchSemantics, RequestBody};
use casting_core::types::DbId;
use casting_core::validation::{validate_age, validate_name};
use serde::Serialize;
use sqlx::FromRow;

/// An actor row from the `actors` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

/// DTO for creating a new actor. All fields are required.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateActor {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

impl CreateActor {
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["name", "gender", "age"];

    /// Build from a request body, rejecting it if any required field is absent.
    pub fn from_body(body: &RequestBody) -> Result<Self, CoreError> {
        let missing = body.missing(Self::REQUIRED_FIELDS);
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let name: String = body.required("name")?;
        validate_name(&name)?;
        let age: i32 = body.required("age")?;
        validate_age(age)?;
        let gender: String = body.required("gender")?;

        Ok(Self { name, age, gender })
    }
}

/// DTO for updating an existing actor. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateActor {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl UpdateActor {
    pub const FIELDS: &'static [&'static str] = &["name", "gender", "age"];

    /// Build from a request body that must name at least one mutable field.
    pub fn from_body(body: &RequestBody, semantics: PatchSemantics) -> Result<Self, CoreError> {
        if !body.contains_any(Self::FIELDS) {
            return Err(CoreError::Validation(format!(
                "Request body must contain at least one of: {}",
                Self::FIELDS.join(", ")
            )));
        }

        let name: Option<String> = body.optional("name", semantics)?;
        if let Some(name) = &name {
            validate_name(name)?;
        }
        let age: Option<i32> = body.optional("age", semantics)?;
        if let Some(age) = age {
            validate_age(age)?;
        }
        let gender: Option<String> = body.optional("gender", semantics)?;

        Ok(Self { name, age, gender })
    }

    /// True when applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none()
    }

    /// Apply the present fields to `actor` in place.
    pub fn apply_to(&self, actor: &mut Actor) {
        if let Some(name) = &self.name {
            actor.name = name.clone();
        }
        if let Some(age) = self.age {
            actor.age = age;
        }
        if let Some(gender) = &self.gender {
            actor.gender = gender.clone();
        }
    }
}
