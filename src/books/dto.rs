use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::utils::date::serializer;

// BookDto is the wire record for the catalog api. Output is camelCase, input
// also accepts the PascalCase property names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    #[serde(default, alias = "Isbn")]
    #[schema(example = "0-306-40615-2")]
    pub isbn: String,
    #[serde(default, alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Author")]
    pub author: String,
    #[serde(default, alias = "ShortDescription")]
    pub short_description: String,
    #[serde(default, alias = "PageCount")]
    pub page_count: i32,
    #[serde(with = "serializer", alias = "ReleaseDate")]
    #[schema(value_type = String, example = "2020-01-01T00:00:00")]
    pub release_date: NaiveDateTime,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str, author: &str, short_description: &str,
               page_count: i32, release_date: NaiveDateTime) -> BookDto {
        BookDto {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            short_description: short_description.to_string(),
            page_count,
            release_date,
        }
    }

    pub fn location(&self) -> String {
        format!("/books/{}", self.isbn)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::books::dto::BookDto;
    use crate::utils::date::parse_date;

    #[test]
    fn test_should_build_books() {
        let release = parse_date("2020-01-01").expect("date");
        let book = BookDto::new("0-306-40615-2", "title", "author", "desc", 10, release);
        assert_eq!("0-306-40615-2", book.isbn.as_str());
        assert_eq!("title", book.title.as_str());
        assert_eq!("/books/0-306-40615-2", book.location());
    }

    #[test]
    fn test_should_serialize_camel_case() {
        let release = parse_date("2020-01-01").expect("date");
        let book = BookDto::new("0-306-40615-2", "T", "A", "D", 10, release);
        let value = serde_json::to_value(&book).expect("should serialize");
        assert_eq!(json!({
            "isbn": "0-306-40615-2",
            "title": "T",
            "author": "A",
            "shortDescription": "D",
            "pageCount": 10,
            "releaseDate": "2020-01-01T00:00:00",
        }), value);
    }

    #[test]
    fn test_should_accept_pascal_case() {
        let book: BookDto = serde_json::from_value(json!({
            "Isbn": "0-306-40615-2",
            "Title": "T",
            "Author": "A",
            "ShortDescription": "D",
            "PageCount": 10,
            "ReleaseDate": "2020-01-01",
        })).expect("should deserialize");
        assert_eq!("D", book.short_description);
        assert_eq!(10, book.page_count);
        assert_eq!(parse_date("2020-01-01"), Some(book.release_date));
    }

    #[test]
    fn test_should_default_missing_text_fields() {
        let book: BookDto = serde_json::from_value(json!({"releaseDate": "2020-01-01"}))
            .expect("should deserialize");
        assert_eq!("", book.title);
        assert_eq!(0, book.page_count);
    }

    #[test]
    fn test_should_require_release_date() {
        assert!(serde_json::from_value::<BookDto>(json!({"isbn": "1"})).is_err());
        assert!(serde_json::from_value::<BookDto>(json!({"releaseDate": "soon"})).is_err());
    }
}
