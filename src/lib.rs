pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use adapters::ReqwestFetcher;
pub use config::{Overrides, Settings};
pub use crate::core::inspector::InspectorClient;
pub use domain::model::{Endpoint, FetchResponse};
pub use domain::ports::HttpFetcher;
pub use utils::error::{InspectorError, Result};
