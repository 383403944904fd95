pub mod accounts;
pub mod flights;
pub mod http;

pub use http::ApiClient;
