use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::books::validator::BookValidator;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
    validator: BookValidator,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
            validator: BookValidator::new(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub isbn: String,
    pub book: BookDto,
}

impl UpdateBookCommandRequest {
    pub fn new(isbn: &str, book: BookDto) -> Self {
        Self {
            isbn: isbn.to_string(),
            book,
        }
    }

    // the path key wins over whatever isbn the body carries
    pub fn build_book(&self) -> BookDto {
        BookDto {
            isbn: self.isbn.to_string(),
            ..self.book.clone()
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book = req.build_book();
        let failures = self.validator.validate(&book);
        if !failures.is_empty() {
            return Err(CommandError::from(failures));
        }
        self.catalog_service.update_book(&book).await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}
