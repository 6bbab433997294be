//! Typed API errors and their GraphQL mapping.
//!
//! A book that does not exist is not an error; resolvers answer `null` or
//! `false` instead.

use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// An argument is present but unusable (blank title, non-numeric id, ...)
    #[error("{0}")]
    Validation(String),

    /// The underlying store failed; only the current request is affected
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Value of `extensions.code` in the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ApiError::validation("bad").code(), "VALIDATION_ERROR");
        let storage = ApiError::from(anyhow::anyhow!("disk I/O error"));
        assert_eq!(storage.code(), "STORAGE_ERROR");
        assert_eq!(storage.to_string(), "Storage error: disk I/O error");
    }

    #[test]
    fn test_extend_sets_message_and_code() {
        let err = ApiError::validation("title must not be empty")
            .extend()
            .into_server_error(async_graphql::Pos::default());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["message"], "title must not be empty");
        assert_eq!(json["extensions"]["code"], "VALIDATION_ERROR");
    }
}
