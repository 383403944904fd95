pub mod app_config;
pub mod session;
pub mod token_file;

pub use app_config::Config;
pub use session::SessionStore;
pub use token_file::{FileTokenStore, MemoryTokenStore};

/// Failures of the token persistence layer. Callers treat these as
/// non-fatal: the in-memory session stays authoritative for the running
/// process.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("token persistence failed: {0}")]
    Io(#[from] std::io::Error),
}
