pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn remove_book(&self, isbn: &str) -> LibraryResult<()>;
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookDto>>;
    async fn find_all_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn search_books_by_title(&self, term: &str) -> LibraryResult<Vec<BookDto>>;
}
