pub mod api;
pub mod http_client;
pub mod metrics;

pub use api::DocumentApi;
pub use http_client::HttpDocumentApi;
