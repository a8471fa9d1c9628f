/// Service modules
pub mod auth;

pub use auth::{Claims, TokenService};
