use crate::adapters::http::ReqwestFetcher;
use crate::core::parse::{parse_bool, parse_int, parse_running_flag};
use crate::domain::model::Endpoint;
use crate::domain::ports::{ConfigProvider, HttpFetcher};
use crate::utils::error::{InspectorError, Result};
use crate::utils::validation::validate_url;
use std::time::Duration;
use url::Url;

const API_PREFIX: &str = "koreader/";
const PLACEHOLDER_BASE: &str = "http://localhost/";

/// Remote control for a KOReader device running the HTTP inspector plugin.
///
/// Every request is a GET against `<base>/koreader/<path>`; the client keeps
/// no state between calls.
pub struct InspectorClient<F: HttpFetcher = ReqwestFetcher> {
    fetcher: F,
    base_url: Url,
}

impl InspectorClient<ReqwestFetcher> {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("base_url", base_url)?;
        Self::with_fetcher(base_url, ReqwestFetcher::new()?)
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        validate_url("base_url", config.base_url())?;
        let fetcher =
            ReqwestFetcher::with_timeout(Duration::from_secs(config.timeout_seconds()))?;
        Self::with_fetcher(config.base_url(), fetcher)
    }
}

impl<F: HttpFetcher> InspectorClient<F> {
    /// Builds a client around any fetcher. An empty `base_url` roots requests
    /// at `http://localhost/`, which is handy for fetchers that ignore the host.
    pub fn with_fetcher(base_url: &str, fetcher: F) -> Result<Self> {
        let base_url = api_root(base_url)?;
        tracing::debug!("Inspector client rooted at {}", base_url);
        Ok(Self { fetcher, base_url })
    }

    /// The resolved `<base>/koreader/` URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.request(path, None).await
    }

    /// Like [`get`](Self::get) with `query` as the URL query. Characters that
    /// are not allowed in a query (spaces, `#`) are percent-encoded; `=` and
    /// `&` go out unchanged.
    pub async fn get_with_query(&self, path: &str, query: &str) -> Result<Vec<u8>> {
        self.request(path, Some(query)).await
    }

    pub async fn get_endpoint(&self, endpoint: Endpoint) -> Result<Vec<u8>> {
        let path = endpoint.path();
        match endpoint.query() {
            Some(query) => self.get_with_query(&path, &query).await,
            None => self.get(&path).await,
        }
    }

    async fn request(&self, path: &str, query: Option<&str>) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", path);

        let result = self.send(path, query).await;
        match &result {
            Ok(body) => {
                tracing::debug!("RESPONSE on GET {}: {}", path, String::from_utf8_lossy(body))
            }
            Err(e) => tracing::error!("GET {} failed: {}", path, e),
        }
        result
    }

    async fn send(&self, path: &str, query: Option<&str>) -> Result<Vec<u8>> {
        let mut url = self.resolve(path)?;
        if let Some(query) = query {
            url.set_query(Some(query));
        }

        let response = self.fetcher.get(&url).await?;
        if !response.is_success() {
            return Err(InspectorError::UnexpectedStatus {
                path: path.to_string(),
                status: response.status,
                body: response.body_text(),
            });
        }
        Ok(response.body)
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        let url = self
            .base_url
            .join(relative)
            .map_err(|e| InspectorError::InvalidUrl {
                input: path.to_string(),
                reason: e.to_string(),
            })?;

        if !url.as_str().starts_with(self.base_url.as_str()) {
            return Err(InspectorError::InvalidUrl {
                input: path.to_string(),
                reason: format!("resolves outside of {}", self.base_url),
            });
        }
        Ok(url)
    }

    pub async fn lua_version(&self) -> Result<String> {
        let body = self.get_endpoint(Endpoint::LuaVersion).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    pub async fn restart_reader(&self) -> Result<()> {
        self.get_endpoint(Endpoint::RestartReader).await?;
        Ok(())
    }

    pub async fn full_refresh(&self) -> Result<()> {
        self.get_endpoint(Endpoint::FullRefresh).await?;
        Ok(())
    }

    pub async fn toggle_night_mode(&self) -> Result<()> {
        self.get_endpoint(Endpoint::ToggleNightMode).await?;
        Ok(())
    }

    pub async fn set_night_mode(&self, night_mode: bool) -> Result<()> {
        self.get_endpoint(Endpoint::SetNightMode(night_mode)).await?;
        Ok(())
    }

    /// Moves `amount` pages forward, or backward when negative.
    pub async fn turn_page_by(&self, amount: i32) -> Result<()> {
        self.get_endpoint(Endpoint::GotoViewRel(amount)).await?;
        Ok(())
    }

    pub async fn next_page(&self) -> Result<()> {
        self.turn_page_by(1).await
    }

    pub async fn prev_page(&self) -> Result<()> {
        self.turn_page_by(-1).await
    }

    pub async fn ssh_is_running(&self) -> Result<bool> {
        let endpoint = Endpoint::SshIsRunning;
        let body = self.get_endpoint(endpoint).await?;
        parse_running_flag(&endpoint.path(), &body)
    }

    /// Starts the SSH server, confirms it is up, and returns its port.
    pub async fn ssh_start(&self) -> Result<u16> {
        self.get_endpoint(Endpoint::SshStart).await?;

        if !self.ssh_is_running().await? {
            return Err(InspectorError::SshState {
                message: format!(
                    "SSH is not running after calling {}",
                    Endpoint::SshStart.path()
                ),
            });
        }

        let port = self.ssh_port().await?;
        tracing::info!("SSH server running on port {}", port);
        Ok(port)
    }

    pub async fn ssh_stop(&self) -> Result<()> {
        self.get_endpoint(Endpoint::SshStop).await?;

        if self.ssh_is_running().await? {
            return Err(InspectorError::SshState {
                message: format!(
                    "SSH is running after calling {}",
                    Endpoint::SshStop.path()
                ),
            });
        }

        tracing::info!("SSH server stopped");
        Ok(())
    }

    pub async fn ssh_port(&self) -> Result<u16> {
        let endpoint = Endpoint::SshPort;
        let body = self.get_endpoint(endpoint).await?;
        parse_int(&endpoint.path(), &body)
    }

    pub async fn ssh_allow_no_password(&self) -> Result<bool> {
        let endpoint = Endpoint::SshAllowNoPassword;
        let body = self.get_endpoint(endpoint).await?;
        parse_bool(&endpoint.path(), &body)
    }

    pub async fn set_ssh_allow_no_password(&self, allow: bool) -> Result<()> {
        self.get_endpoint(Endpoint::SetSshAllowNoPassword(allow))
            .await?;
        Ok(())
    }
}

fn api_root(base_url: &str) -> Result<Url> {
    let base = if base_url.trim().is_empty() {
        PLACEHOLDER_BASE
    } else {
        base_url.trim()
    };

    let mut url = Url::parse(base).map_err(|e| InspectorError::InvalidUrl {
        input: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(InspectorError::InvalidUrl {
            input: base_url.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url.join(API_PREFIX).map_err(|e| InspectorError::InvalidUrl {
        input: base_url.to_string(),
        reason: e.to_string(),
    })
}
