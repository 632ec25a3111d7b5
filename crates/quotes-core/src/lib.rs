//! Quote Store Core Library
//!
//! The store port, its in-memory implementation, and the data bootstrap.

// Re-export pure types from quotes-types
pub use quotes_types::*;

pub mod error;
pub mod ports;
pub mod seed;
pub mod slug;
pub mod storage;

pub use error::{QuoteError, Result};
pub use ports::QuoteStore;
pub use storage::MemStorage;
