//! SQLite storage for saved scenarios.

mod factory;
mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::{IN_MEMORY, SqliteRepository};
