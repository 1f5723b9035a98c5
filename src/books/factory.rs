use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::books::repository::sqlite_book_repository::SqliteBookRepository;
use crate::utils::sqlite::DbConnectionFactory;

pub(crate) fn create_book_repository(connection_factory: Arc<dyn DbConnectionFactory>) -> Box<dyn BookRepository> {
    Box::new(SqliteBookRepository::new(connection_factory))
}
