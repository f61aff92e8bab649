// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `denv show` command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use miette::Result;

/// Display the directory chain and merged environment
#[derive(Debug, Args)]
pub struct CmdShow {
    /// Directory to resolve (ancestors included)
    #[clap(short = 'C', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Show the directory chain
    #[clap(long)]
    chain: bool,

    /// Show the merged variables
    #[clap(long)]
    vars: bool,

    /// Output format: table, json
    #[clap(long, default_value = "table")]
    format: String,
}

impl CmdShow {
    pub async fn run(&mut self) -> Result<i32> {
        let settings = denv::Settings::from_env()?;
        let permissions = denv::PermissionStore::open(&settings)?;
        let profiles = denv::ProfileStore::open(&settings)?;
        let loader = denv::Loader::new(&settings, &permissions, &profiles);

        let chain = loader.directory_chain(&self.dir);
        let vars = loader.load_upward(&self.dir)?;

        let show_chain = self.chain || !self.vars;
        let show_vars = self.vars || !self.chain;

        if self.format == "json" {
            self.show_json(&chain, &vars)?;
            return Ok(0);
        }

        if show_chain {
            self.show_chain_table(&chain, &permissions, &profiles);
        }
        if show_chain && show_vars {
            println!();
        }
        if show_vars {
            self.show_vars_table(&vars);
        }

        Ok(0)
    }

    fn show_chain_table(
        &self,
        chain: &[PathBuf],
        permissions: &denv::PermissionStore,
        profiles: &denv::ProfileStore,
    ) {
        println!("{}", "Directory Chain (outermost first):".bold());
        println!();

        for (i, dir) in chain.iter().rev().enumerate() {
            println!("  {}. {}", i + 1, dir.display().to_string().cyan());

            let base = dir.join(denv::ENVRC_FILENAME);
            println!("     {}", file_status(&base, permissions));

            if let Some(profile) = profiles.active(dir) {
                let overlay = dir.join(denv::profile_filename(profile));
                println!(
                    "     {} {}",
                    file_status(&overlay, permissions),
                    format!("[profile: {}]", profile).yellow()
                );
            }
        }

        println!();
        println!("Total: {} directory(ies)", chain.len());
    }

    fn show_vars_table(&self, vars: &denv::VariableMapping) {
        println!("{}", "Merged Variables:".bold());
        println!();

        if vars.is_empty() {
            println!("  {}", "(no variables)".dimmed());
        } else {
            let sorted: BTreeMap<_, _> = vars.iter().collect();
            for (key, value) in sorted {
                println!("  {} = {}", key.cyan(), value.green());
            }
        }

        println!();
        println!("Total: {} variable(s)", vars.len());
    }

    fn show_json(&self, chain: &[PathBuf], vars: &denv::VariableMapping) -> Result<()> {
        let payload = serde_json::json!({
            "chain": chain
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
            "variables": vars.iter().collect::<BTreeMap<_, _>>(),
        });

        println!(
            "{}",
            serde_json::to_string_pretty(&payload)
                .map_err(|e| miette::miette!("Failed to serialize: {}", e))?
        );

        Ok(())
    }
}

fn file_status(path: &Path, permissions: &denv::PermissionStore) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !path.is_file() {
        format!("{} {}", name, "[missing]".dimmed())
    } else if permissions.is_allowed(path) {
        format!("{} {}", name, "[allowed]".green())
    } else {
        format!("{} {}", name, "[denied]".red())
    }
}
