pub mod authorizor;
mod token;
mod user;

pub use token::{Claims, TokenIssuer};
pub use user::User;
