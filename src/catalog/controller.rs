use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header::LOCATION, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use crate::books::dto::BookDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::catalog::{factory, openapi};
use crate::core::auth::require_api_key;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_rejection_to_server_error, json_to_server_error, ServerError};

fn build_service(state: &AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(state.connection_factory.clone())
}

/// Book routes (guarded when an api key is configured) plus the OpenAPI
/// document in development.
pub fn build_router(state: AppState) -> Router {
    let books = Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/:isbn",
               get(find_book_by_isbn).put(update_book).delete(remove_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    let mut app = Router::new().merge(books);
    if state.config.is_development() {
        app = app.route("/swagger/v1/swagger.json", get(openapi::swagger_json));
    }
    app.layer(TraceLayer::new_for_http()).with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListBooksQuery {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[utoipa::path(post, path = "/books", tag = "Books",
    request_body = BookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Invalid book or ISBN already taken", body = [crate::books::validator::ValidationFailure])
    ))]
pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Response, ServerError> {
    let Json(json) = json.map_err(json_rejection_to_server_error)?;
    let book: BookDto = serde_json::from_value(json).map_err(json_to_server_error)?;
    let svc = build_service(&state);
    let res = AddBookCommand::new(svc).execute(AddBookCommandRequest::new(book)).await?;
    Ok((StatusCode::CREATED, [(LOCATION, res.book.location())], Json(res.book)).into_response())
}

#[utoipa::path(get, path = "/books", tag = "Books",
    params(("searchTerm" = Option<String>, Query, description = "Only books whose title contains this text")),
    responses(
        (status = 200, description = "Matching books", body = [BookDto])
    ))]
pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let svc = build_service(&state);
    let res = ListBooksCommand::new(svc).execute(ListBooksCommandRequest::new(query.search_term)).await?;
    Ok(Json(res.books))
}

#[utoipa::path(get, path = "/books/{isbn}", tag = "Books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "The book", body = BookDto),
        (status = 404, description = "No book with this ISBN")
    ))]
pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<BookDto>, ServerError> {
    let svc = build_service(&state);
    let res = GetBookCommand::new(svc).execute(GetBookCommandRequest::new(isbn)).await?;
    Ok(Json(res.book))
}

#[utoipa::path(put, path = "/books/{isbn}", tag = "Books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    request_body = BookDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Invalid book", body = [crate::books::validator::ValidationFailure]),
        (status = 404, description = "No book with this ISBN")
    ))]
pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<BookDto>, ServerError> {
    let Json(json) = json.map_err(json_rejection_to_server_error)?;
    let book: BookDto = serde_json::from_value(json).map_err(json_to_server_error)?;
    let svc = build_service(&state);
    let res = UpdateBookCommand::new(svc).execute(UpdateBookCommandRequest::new(isbn.as_str(), book)).await?;
    Ok(Json(res.book))
}

#[utoipa::path(delete, path = "/books/{isbn}", tag = "Books",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "No book with this ISBN")
    ))]
pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<StatusCode, ServerError> {
    let svc = build_service(&state);
    let _ = RemoveBookCommand::new(svc).execute(RemoveBookCommandRequest::new(isbn)).await?;
    Ok(StatusCode::NO_CONTENT)
}
