// Adapters layer: concrete implementations for external systems (http, storage, viewer).

pub mod http;
pub mod storage;
pub mod viewer;

pub use http::HttpFetcher;
pub use storage::LocalStorage;
pub use viewer::{NoopViewer, SystemViewer};
