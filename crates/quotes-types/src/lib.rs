//! Quote Types - Pure type definitions
//!
//! Entities, insert payloads and query envelopes shared by the store and the
//! HTTP layer. No runtime dependencies beyond serde.

pub mod author;
pub mod query;
pub mod quote;
pub mod taxonomy;

pub use author::*;
pub use query::*;
pub use quote::*;
pub use taxonomy::*;
