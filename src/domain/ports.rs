use crate::domain::model::FetchResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// The HTTP capability the inspector client needs: a plain GET returning the
/// status and the whole body. Transport failures are errors, HTTP error
/// statuses are not.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &Url) -> Result<FetchResponse>;
}

#[async_trait]
impl<F: HttpFetcher + ?Sized> HttpFetcher for &F {
    async fn get(&self, url: &Url) -> Result<FetchResponse> {
        (**self).get(url).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
