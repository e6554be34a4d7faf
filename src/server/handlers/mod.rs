pub mod accounts;
pub mod health;
pub mod posts;

use std::fmt::Display;

use crate::error::{invalid_input_error, Error};

/// Malformed paths, queries and bodies answer with the crate's error body.
fn malformed<R: Display>(rejection: R) -> Error {
    tracing::debug!("malformed request: {}", rejection);
    invalid_input_error()
}
