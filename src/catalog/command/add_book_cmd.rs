use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::books::validator::{BookValidator, ValidationFailure};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::LibraryError;

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
    validator: BookValidator,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
            validator: BookValidator::new(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) book: BookDto,
}

impl AddBookCommandRequest {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[derive(Debug)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let failures = self.validator.validate(&req.book);
        if !failures.is_empty() {
            return Err(CommandError::from(failures));
        }
        match self.catalog_service.add_book(&req.book).await {
            Ok(book) => Ok(AddBookCommandResponse::new(book)),
            // reported like a field failure so clients get one error shape for rejected creates
            Err(LibraryError::DuplicateKey { .. }) => Err(CommandError::from(vec![
                ValidationFailure::new("Isbn", "Book with this ISBN already exists")])),
            Err(err) => Err(CommandError::from(err)),
        }
    }
}
