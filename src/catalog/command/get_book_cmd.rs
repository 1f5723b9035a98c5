use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GetBookCommandRequest {
    pub(crate) isbn: String,
}

impl GetBookCommandRequest {
    pub fn new(isbn: String) -> Self {
        Self {
            isbn,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GetBookCommandResponse {
    pub book: BookDto,
}

impl GetBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        match self.catalog_service.find_book_by_isbn(req.isbn.as_str()).await? {
            Some(book) => Ok(GetBookCommandResponse::new(book)),
            None => Err(CommandError::NotFound { message: format!("book not found for {}", req.isbn) }),
        }
    }
}
