pub mod sqlite_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // books whose title contains the term, using the storage collation
    async fn search_by_title(&self, term: &str) -> LibraryResult<Vec<BookEntity>>;
}
