use chrono::NaiveDateTime;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::{parse_date, to_storage};

// BookEntity is one row of the Books table; ReleaseDate is kept as the stored text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BookEntity {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub short_description: String,
    pub page_count: i32,
    pub release_date: String,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str, short_description: &str,
               page_count: i32, release_date: &NaiveDateTime) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            short_description: short_description.to_string(),
            page_count,
            release_date: to_storage(release_date),
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        BookEntity::new(other.isbn.as_str(), other.title.as_str(), other.author.as_str(),
                        other.short_description.as_str(), other.page_count, &other.release_date)
    }
}

impl TryFrom<&BookEntity> for BookDto {
    type Error = LibraryError;

    fn try_from(other: &BookEntity) -> LibraryResult<Self> {
        let release_date = parse_date(other.release_date.as_str()).ok_or_else(|| LibraryError::database(
            format!("stored release date {:?} for {} is not a date", other.release_date, other.isbn).as_str(), None))?;
        Ok(BookDto::new(other.isbn.as_str(), other.title.as_str(), other.author.as_str(),
                        other.short_description.as_str(), other.page_count, release_date))
    }
}
