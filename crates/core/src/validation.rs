//! Field validation shared by the create and update paths.

use crate::error::CoreError;

/// Validate a movie title: non-empty once surrounding whitespace is removed.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

/// Validate an actor name: non-empty once surrounding whitespace is removed.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

/// Validate an actor age: zero or greater.
pub fn validate_age(age: i32) -> Result<(), CoreError> {
    if age < 0 {
        return Err(CoreError::Validation(format!(
            "age must not be negative, got {age}"
        )));
    }
    Ok(())
}
