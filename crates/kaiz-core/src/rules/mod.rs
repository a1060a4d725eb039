pub mod validation;

pub use validation::{normalize_value, validate_create, validate_month, validate_update};
