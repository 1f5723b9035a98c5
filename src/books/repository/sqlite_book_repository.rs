use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::utils::sqlite::{DbConnectionFactory, with_connection};

const SELECT_BOOKS: &str = "SELECT Isbn, Title, Author, ShortDescription, PageCount, ReleaseDate FROM Books";

pub struct SqliteBookRepository {
    connection_factory: Arc<dyn DbConnectionFactory>,
}

impl SqliteBookRepository {
    pub(crate) fn new(connection_factory: Arc<dyn DbConnectionFactory>) -> Self {
        Self {
            connection_factory,
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for SqliteBookRepository {
    // A duplicate Isbn fails on the primary key and surfaces as DuplicateKey.
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let book = entity.clone();
        with_connection(&self.connection_factory, move |connection| {
            Ok(connection.execute(
                "INSERT INTO Books (Isbn, Title, Author, ShortDescription, PageCount, ReleaseDate) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![book.isbn, book.title, book.author, book.short_description, book.page_count, book.release_date])?)
        }).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let book = entity.clone();
        with_connection(&self.connection_factory, move |connection| {
            Ok(connection.execute(
                "UPDATE Books SET Title = ?2, Author = ?3, ShortDescription = ?4, PageCount = ?5, ReleaseDate = ?6 WHERE Isbn = ?1",
                params![book.isbn, book.title, book.author, book.short_description, book.page_count, book.release_date])?)
        }).await
    }

    async fn get(&self, id: &str) -> LibraryResult<Option<BookEntity>> {
        let isbn = id.to_string();
        with_connection(&self.connection_factory, move |connection| {
            Ok(connection.query_row(
                format!("{} WHERE Isbn = ?1 LIMIT 1", SELECT_BOOKS).as_str(),
                params![isbn], map_to_book).optional()?)
        }).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let isbn = id.to_string();
        with_connection(&self.connection_factory, move |connection| {
            Ok(connection.execute("DELETE FROM Books WHERE Isbn = ?1", params![isbn])?)
        }).await
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        with_connection(&self.connection_factory, |connection| {
            let mut stmt = connection.prepare(SELECT_BOOKS)?;
            let rows = stmt.query_map([], map_to_book)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        }).await
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn search_by_title(&self, term: &str) -> LibraryResult<Vec<BookEntity>> {
        let term = term.to_string();
        with_connection(&self.connection_factory, move |connection| {
            let mut stmt = connection.prepare(
                format!("{} WHERE Title LIKE '%' || ?1 || '%'", SELECT_BOOKS).as_str())?;
            let rows = stmt.query_map(params![term], map_to_book)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        }).await
    }
}

fn map_to_book(row: &Row<'_>) -> rusqlite::Result<BookEntity> {
    Ok(BookEntity {
        isbn: row.get("Isbn")?,
        title: row.get("Title")?,
        author: row.get("Author")?,
        short_description: row.get("ShortDescription")?,
        page_count: row.get::<_, Option<i32>>("PageCount")?.unwrap_or_default(),
        release_date: row.get("ReleaseDate")?,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::sqlite_book_repository::SqliteBookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;
    use crate::utils::date::parse_date;
    use crate::utils::sqlite::tests::test_factory;

    fn new_book(isbn: &str, title: &str) -> BookEntity {
        BookEntity::new(isbn, title, "author", "description", 100, &parse_date("2020-01-01").expect("date"))
    }

    #[tokio::test]
    async fn test_should_create_get_books() {
        let (_dir, factory) = test_factory().await;
        let books_repo = SqliteBookRepository::new(factory);
        let book = new_book("0-306-40615-2", "test book");
        let size = books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(Some(book), loaded);
    }

    #[tokio::test]
    async fn test_should_return_none_for_missing_book() {
        let (_dir, factory) = test_factory().await;
        let books_repo = SqliteBookRepository::new(factory);
        let loaded = books_repo.get("0000000000").await.expect("should query");
        assert_eq!(None, loaded);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_isbn() {
        let (_dir, factory) = test_factory().await;
        let books_repo = SqliteBookRepository::new(factory);
        let book = new_book("0-306-40615-2", "test book");
        books_repo.create(&book).await.expect("should create book");

        let res = books_repo.create(&new_book("0-306-40615-2", "other")).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        let loaded = books_repo.get(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(Some("test book".to_string()), loaded.map(|b| b.title));
    }

    #[tokio::test]
    async fn test_should_create_update_books() {
        let (_dir, factory) = test_factory().await;
        let books_repo = SqliteBookRepository::new(factory);
        let mut book = new_book("0-306-40615-2", "test book");
        books_repo.create(&book).await.expect("should create book");

        book.title = "new title".to_string();
        book.page_count = 321;
        let size = books_repo.update(&book).await.expect("should update book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(Some(book), loaded);
    }

    #[tokio::test]
    async fn test_should_not_update_missing_book() {
        let (_dir, factory) = test_factory().await;
        let books_repo = SqliteBookRepository::new(factory);
        let size = books_repo.update(&new_book("0-306-40615-2", "ghost")).await.expect("should run update");
        assert_eq!(0, size);
        assert!(books_repo.find_all().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let (_dir, factory) = test_factory().await;
        let books_repo = SqliteBookRepository::new(factory);
        let book = new_book("0-306-40615-2", "test book");
        books_repo.create(&book).await.expect("should create book");

        let deleted = books_repo.delete(book.isbn.as_str()).await.expect("should delete book");
        assert_eq!(1, deleted);
        let deleted = books_repo.delete(book.isbn.as_str()).await.expect("should run delete");
        assert_eq!(0, deleted);

        let loaded = books_repo.get(book.isbn.as_str()).await.expect("should query");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_should_find_all_and_search_books() {
        let (_dir, factory) = test_factory().await;
        let books_repo = SqliteBookRepository::new(factory);
        add_test_books(&books_repo).await;

        let all = books_repo.find_all().await.expect("should list");
        assert_eq!(4, all.len());

        let found = books_repo.search_by_title("Harry").await.expect("should search");
        let isbns: HashSet<String> = found.into_iter().map(|b| b.isbn).collect();
        assert_eq!(HashSet::from(["0000000001".to_string(), "0000000002".to_string()]), isbns);

        let none = books_repo.search_by_title("Gatsby").await.expect("should search");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_should_search_with_like_semantics() {
        let (_dir, factory) = test_factory().await;
        let books_repo = SqliteBookRepository::new(factory);
        add_test_books(&books_repo).await;

        let found = books_repo.search_by_title("harry").await.expect("should search");
        assert_eq!(2, found.len());
        let found = books_repo.search_by_title("HARRY POTTER").await.expect("should search");
        assert_eq!(vec!["0000000001".to_string()], found.into_iter().map(|b| b.isbn).collect::<Vec<_>>());

        // % and _ in the term are wildcards
        let found = books_repo.search_by_title("D_ne").await.expect("should search");
        assert_eq!(vec!["0000000003".to_string()], found.into_iter().map(|b| b.isbn).collect::<Vec<_>>());
        let found = books_repo.search_by_title("Life%Harry").await.expect("should search");
        assert_eq!(vec!["0000000002".to_string()], found.into_iter().map(|b| b.isbn).collect::<Vec<_>>());

        let all = books_repo.search_by_title("").await.expect("should search");
        assert_eq!(4, all.len());
    }

    async fn add_test_books(books_repo: &SqliteBookRepository) {
        let titles = ["Harry Potter", "The Life of Harry", "Dune", "Emma"];
        for (i, title) in titles.iter().enumerate() {
            let book = new_book(format!("{:010}", i + 1).as_str(), title);
            let size = books_repo.create(&book).await.expect("should create book");
            assert_eq!(1, size);
        }
    }
}
