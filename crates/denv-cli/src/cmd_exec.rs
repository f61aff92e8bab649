// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `denv exec` command.

use std::path::PathBuf;
use std::process::Command;

use clap::Args;
use miette::Result;

/// Run a command with a directory's environment applied
#[derive(Debug, Args)]
pub struct CmdExec {
    /// Directory whose environment applies (no ancestor walk)
    #[clap(short = 'C', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Command to run
    command: String,

    /// Arguments for the command
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl CmdExec {
    pub async fn run(&mut self) -> Result<i32> {
        let settings = denv::Settings::from_env()?;
        let permissions = denv::PermissionStore::open(&settings)?;
        let profiles = denv::ProfileStore::open(&settings)?;
        let loader = denv::Loader::new(&settings, &permissions, &profiles);

        // Only the target directory's configuration applies here, not
        // the caller's ancestry.
        let vars = loader.load_single(&self.dir)?;

        let status = Command::new(&self.command)
            .args(&self.args)
            .current_dir(&self.dir)
            .envs(&vars)
            .status()
            .map_err(|e| miette::miette!("Failed to run {:?}: {}", self.command, e))?;

        Ok(status.code().unwrap_or(1))
    }
}
