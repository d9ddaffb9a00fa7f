//! Validation helpers for request DTOs.

use validator::ValidationError;

/// Highest rating the backend accepts.
pub const MAX_RATING: i32 = 100;

/// Validates that a game title contains at least one non-whitespace character.
///
/// # Examples
///
/// ```ignore
/// validate_title("Hollow Knight") // Ok
/// validate_title("   ")           // Err - blank
/// ```
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("title_required");
        err.message = Some("Title is required".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a rating sits in the 0-100 range.
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if !(0..=MAX_RATING).contains(&rating) {
        let mut err = ValidationError::new("rating_range");
        err.message = Some(format!("Rating must be between 0 and {MAX_RATING} (got {rating})").into());
        return Err(err);
    }

    Ok(())
}
