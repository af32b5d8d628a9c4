use std::fmt;

/// Every control path the inspector client talks to, relative to
/// `<base>/koreader/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    LuaVersion,
    RestartReader,
    FullRefresh,
    ToggleNightMode,
    SetNightMode(bool),
    GotoViewRel(i32),
    SshStart,
    SshStop,
    SshIsRunning,
    SshPort,
    SshAllowNoPassword,
    SetSshAllowNoPassword(bool),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::LuaVersion => "globals/_VERSION".to_string(),
            Endpoint::RestartReader => "UIManager/restartKOReader/".to_string(),
            Endpoint::FullRefresh => "event/FullRefresh".to_string(),
            Endpoint::ToggleNightMode => "event/ToggleNightMode".to_string(),
            Endpoint::SetNightMode(on) => format!("event/SetNightMode/{}", on),
            Endpoint::GotoViewRel(amount) => format!("event/GotoViewRel/{}", amount),
            Endpoint::SshStart => "ui/SSH/start/".to_string(),
            Endpoint::SshStop => "ui/SSH/stop/".to_string(),
            Endpoint::SshIsRunning => "ui/SSH/isRunning/".to_string(),
            Endpoint::SshPort => "ui/SSH/SSH_port".to_string(),
            Endpoint::SshAllowNoPassword | Endpoint::SetSshAllowNoPassword(_) => {
                "ui/SSH/allow_no_password".to_string()
            }
        }
    }

    /// Raw query string, sent verbatim after `?`.
    pub fn query(&self) -> Option<String> {
        match self {
            Endpoint::SetSshAllowNoPassword(allow) => Some(format!("={}", allow)),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.query() {
            Some(query) => write!(f, "{}?{}", self.path(), query),
            None => f.write_str(&self.path()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
