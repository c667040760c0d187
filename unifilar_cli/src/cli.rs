// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line arguments and configuration resolution.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use unifilar_model::{FaultAction, SwitchAction};
use unifilar_session::SessionConfig;

#[derive(Debug, Parser)]
#[command(
    name = "unifilar",
    version,
    about = "Single-line diagram viewer and control surface for a distribution network"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    #[command(flatten)]
    pub(crate) settings: Settings,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,
}

/// Session settings. Flags override the `--config` file, which overrides the
/// built-in defaults.
#[derive(Debug, Default, Args)]
pub(crate) struct Settings {
    /// JSON configuration file.
    #[arg(long, value_name = "PATH", env = "UNIFILAR_CONFIG", global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Base URL of the state authority.
    #[arg(long, value_name = "URL", env = "UNIFILAR_BASE_URL", global = true)]
    pub(crate) base_url: Option<String>,

    /// Whole-request timeout in milliseconds.
    #[arg(long, value_name = "MS", env = "UNIFILAR_TIMEOUT_MS", global = true)]
    pub(crate) timeout_ms: Option<u64>,

    /// Canvas width.
    #[arg(long, env = "UNIFILAR_WIDTH", global = true)]
    pub(crate) width: Option<f64>,

    /// Canvas height.
    #[arg(long, env = "UNIFILAR_HEIGHT", global = true)]
    pub(crate) height: Option<f64>,

    /// Canvas margin.
    #[arg(long, env = "UNIFILAR_MARGIN", global = true)]
    pub(crate) margin: Option<f64>,

    /// Activity log entries kept (0 keeps everything).
    #[arg(long, env = "UNIFILAR_LOG_CAPACITY", global = true)]
    pub(crate) log_capacity: Option<usize>,
}

impl Settings {
    /// Builds the session configuration, rejecting a canvas whose margins
    /// leave no room for the drawing.
    pub(crate) fn resolve(&self) -> anyhow::Result<SessionConfig> {
        let base = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => SessionConfig::default(),
        };
        let cfg = self.apply(base);
        cfg.validate().context("invalid canvas settings")?;
        Ok(cfg)
    }

    fn apply(&self, mut cfg: SessionConfig) -> SessionConfig {
        if let Some(url) = &self.base_url {
            cfg.base_url.clone_from(url);
        }
        if self.timeout_ms.is_some() {
            cfg.timeout_ms = self.timeout_ms;
        }
        if let Some(width) = self.width {
            cfg.width = width;
        }
        if let Some(height) = self.height {
            cfg.height = height;
        }
        if let Some(margin) = self.margin {
            cfg.margin = margin;
        }
        if let Some(capacity) = self.log_capacity {
            cfg.log_capacity = capacity;
        }
        cfg
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Load the network and write it as SVG.
    Render {
        /// Output file; stdout when omitted.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Load the network and drive it from an interactive prompt.
    Shell,
    /// Probe the authority's health endpoint.
    Health,
    /// Open or close one line.
    Switch {
        /// Line name.
        line: String,
        /// Requested position.
        #[arg(value_enum)]
        action: SwitchArg,
    },
    /// Apply or clear a fault on one line.
    Fault {
        /// Line name.
        line: String,
        /// Requested change.
        #[arg(value_enum)]
        action: FaultArg,
    },
    /// Restore the authority's default state.
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SwitchArg {
    Open,
    Close,
}

impl From<SwitchArg> for SwitchAction {
    fn from(arg: SwitchArg) -> Self {
        match arg {
            SwitchArg::Open => Self::Open,
            SwitchArg::Close => Self::Close,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum FaultArg {
    Apply,
    Clear,
}

impl From<FaultArg> for FaultAction {
    fn from(arg: FaultArg) -> Self {
        match arg {
            FaultArg::Apply => Self::Apply,
            FaultArg::Clear => Self::Clear,
        }
    }
}
