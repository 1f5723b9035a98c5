use async_trait::async_trait;
use crate::books::validator::ValidationFailure;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Validation {
        failures: Vec<ValidationFailure>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Database {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code } => {
                CommandError::Database { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code }
            }
            LibraryError::Configuration { message } => {
                CommandError::Runtime { message, reason_code: None }
            }
        }
    }
}

impl From<Vec<ValidationFailure>> for CommandError {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        CommandError::Validation { failures }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::validator::ValidationFailure;
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[test]
    fn test_should_map_library_errors() {
        assert!(matches!(CommandError::from(LibraryError::not_found("x")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::duplicate_key("x")), CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(LibraryError::database("x", None)), CommandError::Database { .. }));
        assert!(matches!(CommandError::from(LibraryError::serialization("x")), CommandError::Serialization { .. }));
        assert!(matches!(CommandError::from(LibraryError::configuration("x")), CommandError::Runtime { .. }));
    }

    #[test]
    fn test_should_wrap_validation_failures() {
        let err = CommandError::from(vec![ValidationFailure::new("Isbn", "Invalid ISBN")]);
        match err {
            CommandError::Validation { failures } => assert_eq!(1, failures.len()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
