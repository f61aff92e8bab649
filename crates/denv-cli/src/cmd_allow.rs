// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `denv allow` command.

use clap::Args;
use miette::Result;
use std::path::PathBuf;

/// Grant permission to load an environment file
#[derive(Debug, Args)]
pub struct CmdAllow {
    /// Environment file to trust
    #[clap(default_value = denv::ENVRC_FILENAME)]
    path: PathBuf,
}

impl CmdAllow {
    pub async fn run(&mut self) -> Result<i32> {
        let settings = denv::Settings::from_env()?;
        let mut permissions = denv::PermissionStore::open(&settings)?;

        let canonical = permissions.grant(&self.path)?;
        println!("Allowed {}", canonical.display());

        Ok(0)
    }
}
