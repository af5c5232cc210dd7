pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryEmployeeStore, MemoryUserStore};
pub use postgres::{PgEmployeeStore, PgUserStore};
pub use store::{EmployeeStore, UserStore};
