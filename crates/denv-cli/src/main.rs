// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! denv - Directory-Scoped Environment Manager CLI

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_allow;
mod cmd_deny;
mod cmd_exec;
mod cmd_export;
mod cmd_profile;
mod cmd_prune;
mod cmd_show;

use cmd_allow::CmdAllow;
use cmd_deny::CmdDeny;
use cmd_exec::CmdExec;
use cmd_export::CmdExport;
use cmd_profile::CmdProfile;
use cmd_prune::CmdPrune;
use cmd_show::CmdShow;

#[derive(Parser)]
#[clap(
    name = "denv",
    about = "Directory-Scoped Environment Manager",
    version,
    long_about = "Load per-directory .envrc files, gated by an explicit allow/deny permission store"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Grant permission to load an environment file
    Allow(CmdAllow),

    /// Revoke permission to load an environment file
    Deny(CmdDeny),

    /// Remove permission entries for files that no longer exist
    Prune(CmdPrune),

    /// Display the directory chain and merged environment
    Show(CmdShow),

    /// Print the merged environment for shell evaluation or tooling
    Export(CmdExport),

    /// Run a command with a directory's environment applied
    Exec(CmdExec),

    /// Manage the active profile for a directory
    Profile(CmdProfile),
}

impl Opt {
    async fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .init();

        // Dispatch to command
        match self.cmd {
            Command::Allow(mut cmd) => cmd.run().await,
            Command::Deny(mut cmd) => cmd.run().await,
            Command::Prune(mut cmd) => cmd.run().await,
            Command::Show(mut cmd) => cmd.run().await,
            Command::Export(mut cmd) => cmd.run().await,
            Command::Exec(mut cmd) => cmd.run().await,
            Command::Profile(mut cmd) => cmd.run().await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run().await?;
    std::process::exit(code);
}
