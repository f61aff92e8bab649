// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `denv prune` command.

use clap::Args;
use miette::Result;

/// Remove permission entries for files that no longer exist
#[derive(Debug, Args)]
pub struct CmdPrune {}

impl CmdPrune {
    pub async fn run(&mut self) -> Result<i32> {
        let settings = denv::Settings::from_env()?;
        let mut permissions = denv::PermissionStore::open(&settings)?;

        let removed = permissions.prune()?;
        match removed {
            0 => println!("Nothing to prune"),
            1 => println!("Pruned 1 stale entry"),
            n => println!("Pruned {} stale entries", n),
        }

        Ok(0)
    }
}
