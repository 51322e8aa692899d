pub mod auth;
pub mod validate;

pub use auth::{create_token, verify_token, Claims};
pub use validate::{first_missing, missing_field_message};
