pub mod migrations;
pub mod pool;
pub mod queries;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_in_memory_pool, create_pool, DbPool};
