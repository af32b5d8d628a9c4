use crate::config::cli::{Command, NightModeAction, PageAction, SshAction};
use crate::core::inspector::InspectorClient;
use crate::domain::ports::HttpFetcher;
use crate::utils::error::Result;
use serde_json::{json, Value};

/// Runs one CLI command against the device. Commands without a payload
/// yield `Value::Null`.
pub async fn execute<F: HttpFetcher>(client: &InspectorClient<F>, command: &Command) -> Result<Value> {
    let result = match command {
        Command::Version => {
            let version = client.lua_version().await?;
            json!(version)
        }
        Command::Restart => {
            client.restart_reader().await?;
            Value::Null
        }
        Command::Refresh => {
            client.full_refresh().await?;
            Value::Null
        }
        Command::NightMode { action } => {
            match action {
                NightModeAction::Toggle => client.toggle_night_mode().await?,
                NightModeAction::On => client.set_night_mode(true).await?,
                NightModeAction::Off => client.set_night_mode(false).await?,
            }
            Value::Null
        }
        Command::Page { action } => {
            match action {
                PageAction::Next => client.next_page().await?,
                PageAction::Prev => client.prev_page().await?,
                PageAction::By { amount } => client.turn_page_by(*amount).await?,
            }
            Value::Null
        }
        Command::Ssh { action } => match action {
            SshAction::Start => {
                let port = client.ssh_start().await?;
                json!({ "port": port })
            }
            SshAction::Stop => {
                client.ssh_stop().await?;
                Value::Null
            }
            SshAction::Status => {
                let running = client.ssh_is_running().await?;
                json!({ "running": running })
            }
            SshAction::Port => {
                let port = client.ssh_port().await?;
                json!({ "port": port })
            }
            SshAction::AllowNoPassword { set: Some(allow) } => {
                client.set_ssh_allow_no_password(*allow).await?;
                Value::Null
            }
            SshAction::AllowNoPassword { set: None } => {
                let allow = client.ssh_allow_no_password().await?;
                json!({ "allow_no_password": allow })
            }
        },
        Command::Get { path, query } => {
            let body = match query {
                Some(query) => client.get_with_query(path, query).await?,
                None => client.get(path).await?,
            };
            json!(String::from_utf8_lossy(&body))
        }
    };

    Ok(result)
}

/// The command as typed on the command line, used in output.
pub fn command_name(command: &Command) -> String {
    match command {
        Command::Version => "version".to_string(),
        Command::Restart => "restart".to_string(),
        Command::Refresh => "refresh".to_string(),
        Command::NightMode { action } => match action {
            NightModeAction::Toggle => "night-mode toggle".to_string(),
            NightModeAction::On => "night-mode on".to_string(),
            NightModeAction::Off => "night-mode off".to_string(),
        },
        Command::Page { action } => match action {
            PageAction::Next => "page next".to_string(),
            PageAction::Prev => "page prev".to_string(),
            PageAction::By { amount } => format!("page by {}", amount),
        },
        Command::Ssh { action } => match action {
            SshAction::Start => "ssh start".to_string(),
            SshAction::Stop => "ssh stop".to_string(),
            SshAction::Status => "ssh status".to_string(),
            SshAction::Port => "ssh port".to_string(),
            SshAction::AllowNoPassword { .. } => "ssh allow-no-password".to_string(),
        },
        Command::Get { path, .. } => format!("get {}", path),
    }
}

/// Formats a command result for stdout: one JSON object with `--json`,
/// otherwise plain lines.
pub fn render(command: &Command, result: Value, as_json: bool) -> String {
    if as_json {
        return json!({ "command": command_name(command), "result": result }).to_string();
    }

    match result {
        Value::Null => format!("✅ {}", command_name(command)),
        Value::String(text) => text,
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}
