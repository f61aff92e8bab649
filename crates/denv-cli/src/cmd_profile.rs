// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `denv profile` command.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use miette::Result;

/// Manage the active profile for a directory
#[derive(Debug, Args)]
pub struct CmdProfile {
    /// Directory the profile applies to
    #[clap(short = 'C', long = "dir", default_value = ".")]
    dir: PathBuf,

    #[clap(subcommand)]
    action: ProfileAction,
}

#[derive(Debug, Subcommand)]
enum ProfileAction {
    /// Activate a named profile
    Use {
        /// Profile name (selects the .envrc.NAME overlay)
        name: String,
    },

    /// Print the active profile
    Show,

    /// Clear the active profile
    Clear,
}

impl CmdProfile {
    pub async fn run(&mut self) -> Result<i32> {
        let settings = denv::Settings::from_env()?;
        let mut profiles = denv::ProfileStore::open(&settings)?;

        match &self.action {
            ProfileAction::Use { name } => {
                profiles.set_active(&self.dir, name)?;
                println!(
                    "Using profile {:?} in {} ({} overlays {})",
                    name,
                    self.dir.display(),
                    denv::profile_filename(name),
                    denv::ENVRC_FILENAME,
                );
            }
            ProfileAction::Show => match profiles.active(&self.dir) {
                Some(name) => println!("{}", name),
                None => println!("(no active profile)"),
            },
            ProfileAction::Clear => {
                if profiles.clear_active(&self.dir)? {
                    println!("Cleared profile for {}", self.dir.display());
                } else {
                    println!("No profile set for {}", self.dir.display());
                }
            }
        }

        Ok(0)
    }
}
