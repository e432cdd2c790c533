pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpFetcher, LocalStorage, NoopViewer, SystemViewer};
pub use config::SearchConfig;
pub use app::pipelines::search_pipeline::PitcherSearchPipeline;
pub use core::engine::SearchEngine;
pub use utils::error::{Result, SearchError};
