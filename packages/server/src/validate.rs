//! Checks on incoming statements.

use gorod_api_models::{DEFAULT_SOURCE, Statement};

/// Shortest accepted description, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Checks `statement` and normalises it in place: fields are trimmed and
/// an empty source becomes `web`.
///
/// # Errors
///
/// Returns a message naming the first problem found.
pub fn validate(statement: &mut Statement) -> Result<(), String> {
    statement.district = statement.district.trim().to_string();
    statement.category = statement.category.trim().to_string();
    statement.subcategory = statement.subcategory.trim().to_string();
    statement.description = statement.description.trim().to_string();
    statement.source = statement.source.trim().to_string();

    if statement.district().is_none() {
        return Err(format!("unknown district: {:?}", statement.district));
    }
    if statement.category().is_none() {
        return Err(format!("unknown category: {:?}", statement.category));
    }
    if statement.description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(format!(
            "description must be at least {MIN_DESCRIPTION_CHARS} characters"
        ));
    }
    if statement.source.is_empty() {
        statement.source = DEFAULT_SOURCE.to_string();
    }
    Ok(())
}
