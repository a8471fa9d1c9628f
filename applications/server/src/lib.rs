//! E-Bazar Server Library
//!
//! Bearer-token-gated JSON API for the E-Bazar shop backend.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{Claims, TokenService};
pub use state::AppState;
