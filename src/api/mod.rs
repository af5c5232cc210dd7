pub mod format;
pub mod pagination;

pub use format::{EmployeeResponse, UserResponse};
pub use pagination::{Page, PageRequest, PageSlice, PageWindow};
