// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `unifilar`: render and operate a distribution network from the terminal.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use unifilar_client::{HttpAuthority, StateAuthority};
use unifilar_model::Command as NetCommand;
use unifilar_session::{Session, SessionConfig};

mod cli;
mod logging;
mod shell;

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;
    let config = cli.settings.resolve()?;
    let mut authority = HttpAuthority::new(&config.base_url, config.timeout());
    info!(base_url = authority.base_url(), "using authority");

    match cli.command {
        Command::Render { output } => {
            let session = boot(authority, config)?;
            let svg = session.to_svg();
            match output {
                Some(path) => {
                    fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "diagram written");
                }
                None => io::stdout().write_all(svg.as_bytes())?,
            }
        }
        Command::Shell => {
            let mut session = boot(authority, config)?;
            let stdin = io::stdin();
            shell::run(&mut session, stdin.lock(), &mut io::stdout())?;
        }
        Command::Health => {
            let health = authority.health()?;
            println!("{} ok={}", health.service, health.ok);
            if !health.ok {
                bail!("authority reports unhealthy");
            }
        }
        Command::Switch { line, action } => {
            send(&mut authority, &NetCommand::switch(&line, action.into()))?;
        }
        Command::Fault { line, action } => {
            send(&mut authority, &NetCommand::fault(&line, action.into()))?;
        }
        Command::Reset => send(&mut authority, &NetCommand::Reset)?,
    }
    Ok(())
}

fn boot(authority: HttpAuthority, config: SessionConfig) -> anyhow::Result<Session<HttpAuthority>> {
    let mut session = Session::new(authority, config);
    session.boot().context("Startup failed")?;
    Ok(session)
}

fn send(authority: &mut HttpAuthority, command: &NetCommand) -> anyhow::Result<()> {
    authority
        .issue(command)
        .with_context(|| format!("{} failed", command.describe()))?;
    println!("{}", command.describe());
    Ok(())
}
