use axum::response::Json;
use utoipa::OpenApi;
use crate::books::dto::BookDto;
use crate::books::validator::ValidationFailure;
use crate::catalog::controller;

#[derive(OpenApi)]
#[openapi(
    paths(
        controller::add_book,
        controller::list_books,
        controller::find_book_by_isbn,
        controller::update_book,
        controller::remove_book,
    ),
    components(schemas(BookDto, ValidationFailure)),
    tags((name = "Books", description = "Book catalog"))
)]
pub struct ApiDoc;

pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = "Library API".to_string();
    doc.info.version = "v1".to_string();
    doc.info.description = Some("An API for managing a library of books".to_string());
    doc
}

pub(crate) async fn swagger_json() -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc())
}
