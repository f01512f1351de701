pub mod categories;
pub mod flashcards;

use axum::response::Redirect;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use validator::ValidationError;

/// Flash-style notice carried between redirects as a query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub message: Option<String>,
}

pub(crate) fn redirect_with_message(path: &str, message: &str) -> Redirect {
    let encoded = utf8_percent_encode(message, NON_ALPHANUMERIC);
    Redirect::to(&format!("{path}?message={encoded}"))
}

/// Rejects empty and whitespace-only values.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}
