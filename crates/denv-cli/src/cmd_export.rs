// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `denv export` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use miette::Result;

/// Print the merged environment for shell evaluation or tooling
#[derive(Debug, Args)]
pub struct CmdExport {
    /// Directory to resolve (ancestors included)
    #[clap(short = 'C', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Output format: shell, json
    #[clap(long, default_value = "shell")]
    format: String,
}

impl CmdExport {
    pub async fn run(&mut self) -> Result<i32> {
        let settings = denv::Settings::from_env()?;
        let permissions = denv::PermissionStore::open(&settings)?;
        let profiles = denv::ProfileStore::open(&settings)?;
        let loader = denv::Loader::new(&settings, &permissions, &profiles);

        let vars = loader.load_upward(&self.dir)?;

        // Sorted output, whatever the format.
        let sorted: BTreeMap<_, _> = vars.into_iter().collect();

        if self.format == "json" {
            println!(
                "{}",
                serde_json::to_string_pretty(&sorted)
                    .map_err(|e| miette::miette!("Failed to serialize environment: {}", e))?
            );
        } else {
            for (key, value) in &sorted {
                println!("export {}='{}'", key, shell_quote(value));
            }
        }

        Ok(0)
    }
}

/// Escape embedded single quotes for a single-quoted shell word.
fn shell_quote(value: &str) -> String {
    value.replace('\'', r"'\''")
}
