use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
    // Settings file, environment or connection string could not be used.
    Configuration {
        message: String,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn configuration(message: &str) -> LibraryError {
        LibraryError::Configuration { message: message.to_string() }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<tokio::task::JoinError> for LibraryError {
    fn from(err: tokio::task::JoinError) -> Self {
        let reason = if err.is_cancelled() { "cancelled" } else { "panicked" };
        LibraryError::runtime(
            format!("blocking task failed {}", err).as_str(), Some(reason.to_string()))
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Configuration { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the library catalog.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;

    #[test]
    fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None), LibraryError::Database{ message: _, reason_code: _ }));
    }

    #[test]
    fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[test]
    fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[test]
    fn test_should_create_serialization_error() {
        assert!(matches!(LibraryError::serialization("test"), LibraryError::Serialization{ message: _ }));
    }

    #[test]
    fn test_should_create_runtime_error() {
        assert!(matches!(LibraryError::runtime("test", None), LibraryError::Runtime{ message: _, reason_code: _ }));
    }

    #[test]
    fn test_should_create_configuration_error() {
        assert!(matches!(LibraryError::configuration("test"), LibraryError::Configuration{ message: _ }));
    }

    #[test]
    fn test_should_convert_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("should fail");
        assert!(matches!(LibraryError::from(err), LibraryError::Serialization{ message: _ }));
    }

    #[test]
    fn test_should_format_errors() {
        assert_eq!("missing", LibraryError::not_found("missing").to_string());
        assert_eq!("db Some(\"1555\")", LibraryError::database("db", Some("1555".to_string())).to_string());
    }
}
