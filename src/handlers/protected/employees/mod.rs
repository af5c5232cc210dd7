// handlers/protected/employees/mod.rs - Employee resource handlers
//
// Collection:  GET/POST          /api/employees/
// Record:      GET/PUT/PATCH/DELETE /api/employees/:id/

pub mod collection;
pub mod record;

pub use collection::{create, list};
pub use record::{destroy, partial_update, retrieve, update};
