// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition and account registration. These routes sit outside the
// JWT middleware.

pub mod refresh; // POST /api/token/refresh/ - exchange a refresh token
pub mod register; // POST /api/register/ - create an API account
pub mod token; // POST /api/token/ - obtain an access/refresh pair

pub use refresh::refresh_post;
pub use register::register_post;
pub use token::token_post;

use crate::validation::{FieldErrors, REQUIRED};

pub const BLANK: &str = "This field may not be blank.";

/// Required string field of a credentials body.
pub(crate) fn require(value: Option<String>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(v) if v.trim().is_empty() => {
            errors.add(field, BLANK);
            None
        }
        Some(v) => Some(v),
    }
}
