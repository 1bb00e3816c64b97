//! Registrar API implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod godaddy;

pub use godaddy::GodaddyProvider;
