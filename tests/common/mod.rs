#![allow(dead_code)]

use async_trait::async_trait;
use koreader_inspector::{FetchResponse, HttpFetcher, InspectorError, Result};
use std::sync::Mutex;
use url::Url;

#[derive(Debug, Clone)]
pub struct DeviceState {
    pub ssh_running: bool,
    /// When set, start/stop requests are accepted but change nothing.
    pub ssh_stuck: bool,
    pub ssh_port: u16,
    pub allow_no_password: bool,
    pub night_mode: bool,
    pub page: i32,
    pub refreshes: u32,
    pub restarts: u32,
    pub offline: bool,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            ssh_running: false,
            ssh_stuck: false,
            ssh_port: 2222,
            allow_no_password: false,
            night_mode: false,
            page: 1,
            refreshes: 0,
            restarts: 0,
            offline: false,
        }
    }
}

/// In-memory stand-in for a KOReader device: answers the inspector
/// endpoints, keeps enough state to check side effects and records every
/// requested URL.
#[derive(Default)]
pub struct FakeDevice {
    state: Mutex<DeviceState>,
    requests: Mutex<Vec<Url>>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: DeviceState) -> Self {
        Self {
            state: Mutex::new(state),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state.lock().unwrap().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut DeviceState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    /// Requested paths, with the query appended when there is one.
    pub fn request_paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|url| match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            })
            .collect()
    }

    fn handle(&self, url: &Url) -> FetchResponse {
        let mut state = self.state.lock().unwrap();
        let path = url.path();

        let body = match path {
            "/koreader/globals/_VERSION" => "Lua 5.1".to_string(),
            "/koreader/UIManager/restartKOReader/" => {
                state.restarts += 1;
                String::new()
            }
            "/koreader/event/FullRefresh" => {
                state.refreshes += 1;
                String::new()
            }
            "/koreader/event/ToggleNightMode" => {
                state.night_mode = !state.night_mode;
                String::new()
            }
            "/koreader/ui/SSH/isRunning/" => format!("[{}]", state.ssh_running),
            "/koreader/ui/SSH/start/" => {
                if !state.ssh_stuck {
                    state.ssh_running = true;
                }
                String::new()
            }
            "/koreader/ui/SSH/stop/" => {
                if !state.ssh_stuck {
                    state.ssh_running = false;
                }
                String::new()
            }
            "/koreader/ui/SSH/SSH_port" => state.ssh_port.to_string(),
            "/koreader/ui/SSH/allow_no_password" => match url.query() {
                Some("=true") => {
                    state.allow_no_password = true;
                    String::new()
                }
                Some("=false") => {
                    state.allow_no_password = false;
                    String::new()
                }
                _ => state.allow_no_password.to_string(),
            },
            other => {
                if let Some(value) = other.strip_prefix("/koreader/event/SetNightMode/") {
                    state.night_mode = value == "true";
                    String::new()
                } else if let Some(amount) = other.strip_prefix("/koreader/event/GotoViewRel/") {
                    match amount.parse::<i32>() {
                        Ok(amount) => {
                            state.page += amount;
                            String::new()
                        }
                        Err(_) => return bad_request(),
                    }
                } else {
                    return FetchResponse {
                        status: 404,
                        body: b"not found".to_vec(),
                    };
                }
            }
        };

        FetchResponse::ok(body)
    }
}

fn bad_request() -> FetchResponse {
    FetchResponse {
        status: 400,
        body: b"bad request".to_vec(),
    }
}

#[async_trait]
impl HttpFetcher for FakeDevice {
    async fn get(&self, url: &Url) -> Result<FetchResponse> {
        self.requests.lock().unwrap().push(url.clone());

        if self.state.lock().unwrap().offline {
            return Err(InspectorError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "device offline",
            )));
        }

        Ok(self.handle(url))
    }
}
