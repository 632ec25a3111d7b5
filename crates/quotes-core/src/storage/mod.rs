//! Storage layer
//!
//! The in-memory tables back every deployment; the dataset is rebuilt by the
//! seeder on startup.

pub mod memory;

pub use memory::MemStorage;
