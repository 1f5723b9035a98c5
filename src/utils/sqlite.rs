use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use rusqlite::{Connection, ErrorCode};
use tracing::info;
use crate::core::library::{LibraryError, LibraryResult};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_BOOKS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Books (
        Isbn TEXT PRIMARY KEY,
        Title TEXT NOT NULL,
        Author TEXT NOT NULL,
        ShortDescription TEXT NOT NULL,
        PageCount INTEGER,
        ReleaseDate TEXT NOT NULL
    )";

/// Opens storage connections; implementations must be safe to share between requests.
pub trait DbConnectionFactory: Sync + Send {
    fn create_connection(&self) -> LibraryResult<Connection>;
}

#[derive(Debug, Clone)]
pub struct SqliteConnectionFactory {
    data_source: PathBuf,
}

impl SqliteConnectionFactory {
    pub fn new(connection_string: &str) -> LibraryResult<Self> {
        let data_source = parse_data_source(connection_string)?;
        Ok(Self { data_source: PathBuf::from(data_source) })
    }

    pub fn data_source(&self) -> &PathBuf {
        &self.data_source
    }
}

impl DbConnectionFactory for SqliteConnectionFactory {
    fn create_connection(&self) -> LibraryResult<Connection> {
        let connection = Connection::open(&self.data_source)?;
        connection.busy_timeout(BUSY_TIMEOUT)?;
        Ok(connection)
    }
}

// Accepts `Data Source=path;Key=Value` or a bare file path.
pub(crate) fn parse_data_source(connection_string: &str) -> LibraryResult<String> {
    let trimmed = connection_string.trim();
    if !trimmed.contains('=') {
        return if trimmed.is_empty() {
            Err(LibraryError::configuration("connection string is empty"))
        } else {
            Ok(trimmed.to_string())
        };
    }
    for pair in trimmed.split(';') {
        if let Some((key, value)) = pair.split_once('=') {
            let key = key.trim().to_ascii_lowercase();
            if matches!(key.as_str(), "data source" | "datasource" | "filename") && !value.trim().is_empty() {
                return Ok(value.trim().to_string());
            }
        }
    }
    Err(LibraryError::configuration(
        format!("connection string {:?} has no data source", connection_string).as_str()))
}

/// Runs `f` on the blocking pool with a connection of its own; the connection is
/// dropped when `f` returns, whatever the outcome.
pub(crate) async fn with_connection<T, F>(factory: &Arc<dyn DbConnectionFactory>, f: F) -> LibraryResult<T>
    where T: Send + 'static,
          F: FnOnce(&Connection) -> LibraryResult<T> + Send + 'static {
    let factory = factory.clone();
    tokio::task::spawn_blocking(move || {
        let connection = factory.create_connection()?;
        f(&connection)
    }).await?
}

/// Creates the Books table when absent. Safe to run on every start.
pub async fn initialize_database(factory: &Arc<dyn DbConnectionFactory>) -> LibraryResult<()> {
    with_connection(factory, |connection| {
        connection.execute_batch(CREATE_BOOKS_TABLE)?;
        Ok(())
    }).await?;
    info!("books table is ready");
    Ok(())
}

impl From<rusqlite::Error> for LibraryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, _) if failure.code == ErrorCode::ConstraintViolation => {
                LibraryError::duplicate_key(format!("constraint violation {}", err).as_str())
            }
            rusqlite::Error::SqliteFailure(ref failure, _) => {
                LibraryError::database(format!("sqlite error {}", err).as_str(),
                                       Some(failure.extended_code.to_string()))
            }
            _ => {
                LibraryError::database(format!("sqlite error {}", err).as_str(), None)
            }
        }
    }
}
