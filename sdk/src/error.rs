use query::QueryError;
use shopgraph_core::error::{ErrorCode, ShopgraphError};
use shopgraph_core::model::FieldError;
use storage::{GraphError, StoreError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("query error: {0}")]
    Query(#[from] QueryError),
    #[error("invalid field: {0}")]
    InvalidField(#[from] FieldError),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("invalid command payload: {0}")]
    InvalidPayload(String),
}

impl ShopgraphError for SessionError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SessionError::Store(err) => err.error_code(),
            SessionError::Graph(err) => err.error_code(),
            SessionError::Query(err) => err.error_code(),
            SessionError::InvalidField(err) => err.error_code(),
            SessionError::UnknownCommand(_) => ErrorCode::InvalidArgument,
            SessionError::InvalidPayload(_) => ErrorCode::InvalidArgument,
        }
    }
}
