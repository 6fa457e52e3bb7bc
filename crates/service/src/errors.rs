use std::fmt::Display;

use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn invalid_argument(param: &str) -> Self { Self::InvalidArgument(format!("invalid {} number", param)) }

    /// Wrap a store failure with the operation that hit it.
    pub fn storage(context: &str, err: impl Display) -> Self { Self::Storage(format!("{}: {}", context, err)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::InvalidArgument(msg),
            ModelError::Db(msg) => Self::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_parameter() {
        assert_eq!(ServiceError::invalid_argument("page").to_string(), "invalid argument: invalid page number");
        assert_eq!(ServiceError::invalid_argument("limit").to_string(), "invalid argument: invalid limit number");
    }

    #[test]
    fn model_errors_map_onto_taxonomy() {
        assert!(matches!(ServiceError::from(ModelError::Validation("group required".into())), ServiceError::InvalidArgument(_)));
        assert!(matches!(ServiceError::from(ModelError::Db("boom".into())), ServiceError::Storage(_)));
    }
}
