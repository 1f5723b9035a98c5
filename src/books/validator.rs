use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::books::dto::BookDto;

lazy_static! {
    // digits and hyphens only, ending on a digit; the digit count is checked separately
    static ref ISBN_SHAPE: Regex = Regex::new(r"^[0-9-]*[0-9]$").expect("valid isbn pattern");
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BookValidator;

impl BookValidator {
    pub fn new() -> Self {
        Self
    }

    /// Returns every failed rule; an empty list means the book is valid.
    pub fn validate(&self, book: &BookDto) -> Vec<ValidationFailure> {
        let mut failures = vec![];
        if !is_valid_isbn(book.isbn.as_str()) {
            failures.push(ValidationFailure::new("Isbn", "Invalid ISBN"));
        }
        not_empty(&mut failures, "Title", "Title", book.title.as_str());
        not_empty(&mut failures, "Author", "Author", book.author.as_str());
        not_empty(&mut failures, "ShortDescription", "Short Description", book.short_description.as_str());
        if book.page_count <= 0 {
            failures.push(ValidationFailure::new("PageCount", "'Page Count' must be greater than '0'."));
        }
        failures
    }
}

/// ISBN-10 or ISBN-13: only digits and hyphens, exactly 10 or 13 digits.
pub fn is_valid_isbn(isbn: &str) -> bool {
    if !ISBN_SHAPE.is_match(isbn) {
        return false;
    }
    let digits = isbn.chars().filter(char::is_ascii_digit).count();
    digits == 10 || digits == 13
}

fn not_empty(failures: &mut Vec<ValidationFailure>, field: &str, display_name: &str, value: &str) {
    if value.trim().is_empty() {
        failures.push(ValidationFailure::new(field, format!("'{}' must not be empty.", display_name).as_str()));
    }
}
