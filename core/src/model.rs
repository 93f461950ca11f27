use crate::error::{ErrorCode, ShopgraphError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted value for any string field, in bytes.
pub const MAX_FIELD_LEN: usize = 50;

/// Dense per-directory user number, also the user's vertex in the interaction graph.
pub type UserIndex = usize;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{field} must be at most {max} bytes (got {len})")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },
}

impl ShopgraphError for FieldError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

pub fn validate_field(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Empty(field));
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(FieldError::TooLong {
            field,
            max: MAX_FIELD_LEN,
            len: value.len(),
        });
    }
    Ok(())
}

/// Serialize-only: the password never leaves the process, so a serialized
/// user cannot be read back into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub index: UserIndex,
    pub username: String,
    pub email: String,
    // Stored as entered; credential hardening is out of scope.
    #[serde(skip_serializing)]
    pub password: String,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub inventory: u32,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        inventory: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            category: category.into(),
            inventory,
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        validate_field("product_id", &self.product_id)?;
        validate_field("name", &self.name)?;
        validate_field("category", &self.category)
    }
}

/// How a user touched a product. Both kinds produce the same graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Browse,
    Purchase,
}

impl std::fmt::Display for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interaction::Browse => write!(f, "browse"),
            Interaction::Purchase => write!(f, "purchase"),
        }
    }
}
