use async_trait::async_trait;
use tracing::{debug, error, info};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    // The lookup only produces the friendly error early; the primary key decides.
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        debug!(isbn = book.isbn.as_str(), "adding book");
        if self.book_repository.get(book.isbn.as_str()).await?.is_some() {
            info!(isbn = book.isbn.as_str(), "book already exists");
            return Err(duplicate(book.isbn.as_str()));
        }
        match self.book_repository.create(&BookEntity::from(book)).await {
            Ok(size) if size > 0 => Ok(book.clone()),
            Ok(_) => Err(LibraryError::database(
                format!("no row written for book {}", book.isbn).as_str(), None)),
            Err(LibraryError::DuplicateKey { .. }) => {
                info!(isbn = book.isbn.as_str(), "book created concurrently");
                Err(duplicate(book.isbn.as_str()))
            }
            Err(err) => Err(log_failure("add_book", err)),
        }
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<()> {
        debug!(isbn, "removing book");
        let size = self.book_repository.delete(isbn).await.map_err(|err| log_failure("remove_book", err))?;
        if size == 0 {
            return Err(not_found(isbn));
        }
        Ok(())
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        debug!(isbn = book.isbn.as_str(), "updating book");
        if self.book_repository.get(book.isbn.as_str()).await?.is_none() {
            info!(isbn = book.isbn.as_str(), "book to update does not exist");
            return Err(not_found(book.isbn.as_str()));
        }
        // the row may have been removed since the lookup
        let size = self.book_repository.update(&BookEntity::from(book)).await
            .map_err(|err| log_failure("update_book", err))?;
        if size == 0 {
            return Err(not_found(book.isbn.as_str()));
        }
        Ok(book.clone())
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookDto>> {
        match self.book_repository.get(isbn).await? {
            Some(entity) => Ok(Some(BookDto::try_from(&entity)?)),
            None => Ok(None),
        }
    }

    async fn find_all_books(&self) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.find_all().await?;
        res.iter().map(BookDto::try_from).collect()
    }

    async fn search_books_by_title(&self, term: &str) -> LibraryResult<Vec<BookDto>> {
        debug!(term, "searching books by title");
        let res = self.book_repository.search_by_title(term).await?;
        res.iter().map(BookDto::try_from).collect()
    }
}

fn duplicate(isbn: &str) -> LibraryError {
    LibraryError::duplicate_key(format!("book with isbn {} already exists", isbn).as_str())
}

fn not_found(isbn: &str) -> LibraryError {
    LibraryError::not_found(format!("book not found for {}", isbn).as_str())
}

fn log_failure(operation: &str, err: LibraryError) -> LibraryError {
    error!(operation, error = %err, "storage operation failed");
    err
}
