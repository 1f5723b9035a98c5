use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListBooksCommandRequest {
    pub(crate) search_term: Option<String>,
}

impl ListBooksCommandRequest {
    pub fn new(search_term: Option<String>) -> Self {
        Self {
            search_term,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl ListBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        let books = match req.search_term {
            Some(term) => self.catalog_service.search_books_by_title(term.as_str()).await?,
            None => self.catalog_service.find_all_books().await?,
        };
        Ok(ListBooksCommandResponse::new(books))
    }
}
