use std::sync::Arc;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};
use tracing::info;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::utils::sqlite::{DbConnectionFactory, SqliteConnectionFactory};

#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub connection_factory: Arc<dyn DbConnectionFactory>,
}

impl AppState {
    pub fn new(config: Configuration) -> LibraryResult<AppState> {
        let connection_factory = SqliteConnectionFactory::new(config.database.connection_string.as_str())?;
        info!(data_source = %connection_factory.data_source().display(), "using sqlite database");
        Ok(AppState {
            config,
            connection_factory: Arc::new(connection_factory),
        })
    }
}

#[derive(Debug)]
pub struct ServerError {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ServerError {
    pub fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::new(status, Some(json!({ "message": message })))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::message(StatusCode::BAD_REQUEST, format!("{}", err).as_str())
}

pub fn json_rejection_to_server_error(rejection: JsonRejection) -> ServerError {
    ServerError::message(rejection.status(), rejection.body_text().as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Validation { failures } => {
                ServerError::new(StatusCode::BAD_REQUEST, Some(json!(failures)))
            }
            CommandError::DuplicateKey { message } => {
                ServerError::message(StatusCode::CONFLICT, message.as_str())
            }
            CommandError::NotFound { .. } => {
                ServerError::new(StatusCode::NOT_FOUND, None)
            }
            CommandError::Serialization { message } => {
                ServerError::message(StatusCode::BAD_REQUEST, message.as_str())
            }
            CommandError::Database { .. } | CommandError::Runtime { .. } => {
                ServerError::message(StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err).as_str())
            }
        }
    }
}
