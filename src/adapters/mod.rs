// Adapters layer: concrete implementations of the domain ports (sqlite, memory),
// the HTTP surface, and the CSV route seeder.

pub mod http;
pub mod memory;
pub mod seed;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;
