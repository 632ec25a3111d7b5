//! Error types for the quote store

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuoteError>;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Quote not found: {0}")]
    QuoteNotFound(u32),

    #[error("Category not found: {0}")]
    CategoryNotFound(u32),

    #[error("Tag not found: {0}")]
    TagNotFound(u32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl QuoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            QuoteError::QuoteNotFound(_)
                | QuoteError::CategoryNotFound(_)
                | QuoteError::TagNotFound(_)
        )
    }
}
