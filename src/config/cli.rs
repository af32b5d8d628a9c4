use crate::config::{Overrides, Settings};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "koreader-inspector")]
#[command(about = "Remote control for KOReader's HTTP inspector", version)]
pub struct CliConfig {
    /// Device address, e.g. http://192.168.15.244:8080/
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// TOML config file (defaults to ./koreader-inspector.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the device's Lua version
    Version,
    /// Restart KOReader
    Restart,
    /// Trigger a full e-ink refresh
    Refresh,
    /// Night mode control
    NightMode {
        #[command(subcommand)]
        action: NightModeAction,
    },
    /// Page navigation
    Page {
        #[command(subcommand)]
        action: PageAction,
    },
    /// SSH server control
    Ssh {
        #[command(subcommand)]
        action: SshAction,
    },
    /// Raw GET below /koreader/, printing the body
    Get {
        path: String,
        #[arg(long)]
        query: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum NightModeAction {
    Toggle,
    On,
    Off,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum PageAction {
    Next,
    Prev,
    /// Turn by N pages; negative goes back
    By {
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum SshAction {
    /// Start the server and print its port
    Start,
    Stop,
    Status,
    Port,
    /// Read, or with --set change, whether passwordless login is allowed
    AllowNoPassword {
        #[arg(long)]
        set: Option<bool>,
    },
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            timeout_seconds: self.timeout_seconds,
            json: self.json,
        }
    }

    pub fn settings(&self) -> Result<Settings> {
        Settings::load(&self.overrides(), self.config.as_deref())
    }

    /// JSON output as resolved by the settings, falling back to the flag
    /// when the settings failed to load.
    pub fn json_output(&self, settings: Option<&Settings>) -> bool {
        settings.map(|s| s.json).unwrap_or(self.json)
    }
}
