pub mod inspector;
pub mod parse;

pub use crate::domain::model::{Endpoint, FetchResponse};
pub use crate::domain::ports::{ConfigProvider, HttpFetcher};
pub use crate::utils::error::Result;
