// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `denv deny` command.

use clap::Args;
use miette::Result;
use std::path::PathBuf;

/// Revoke permission to load an environment file
#[derive(Debug, Args)]
pub struct CmdDeny {
    /// Environment file to distrust
    #[clap(default_value = denv::ENVRC_FILENAME)]
    path: PathBuf,
}

impl CmdDeny {
    pub async fn run(&mut self) -> Result<i32> {
        let settings = denv::Settings::from_env()?;
        let mut permissions = denv::PermissionStore::open(&settings)?;

        let canonical = permissions.revoke(&self.path)?;
        println!("Denied {}", canonical.display());

        Ok(0)
    }
}
