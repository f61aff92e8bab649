// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Parsing of `.envrc` content into a variable mapping.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{DANGEROUS_VARIABLES, MAX_INTERPOLATION_DEPTH};

#[cfg(test)]
#[path = "./parser_test.rs"]
mod parser_test;

/// Variable name to value, unique keys.
pub type VariableMapping = HashMap<String, String>;

static VARIABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Parse environment-file text into a variable mapping.
///
/// The grammar is `[export ]KEY=[VALUE]` per line. Blank lines and `#`
/// comments are skipped, one layer of matching single or double quotes
/// is stripped from the value, lines with invalid names are silently
/// ignored, dangerous names are dropped with one aggregated warning,
/// and a later line with the same key overwrites an earlier one.
///
/// After all lines are collected, `${NAME}` references are resolved
/// against the same file's mapping. References to unknown names stay
/// verbatim; cyclic or overly deep chains are errors.
///
/// Pure and deterministic: identical input always yields an identical
/// mapping.
pub fn parse_config(content: &str) -> crate::Result<VariableMapping> {
    let mut vars = VariableMapping::new();
    let mut dropped: Vec<&str> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line
            .strip_prefix("export ")
            .map(str::trim_start)
            .unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = strip_quotes(value.trim());

        if !VARIABLE_NAME.is_match(key) {
            continue;
        }

        if let Some(&name) = DANGEROUS_VARIABLES.get(key) {
            if !dropped.contains(&name) {
                dropped.push(name);
            }
            continue;
        }

        vars.insert(key.to_string(), value.to_string());
    }

    if !dropped.is_empty() {
        tracing::warn!(
            variables = %dropped.join(", "),
            "dropped dangerous variables from environment file"
        );
    }

    interpolate(&vars)
}

/// Strip exactly one layer of matching wrapping quotes, if present.
/// No escape processing happens inside the quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Resolve `${NAME}` references in every value against `vars`.
/// Names resolve in sorted order so diagnostics are stable.
fn interpolate(vars: &VariableMapping) -> crate::Result<VariableMapping> {
    let mut names: Vec<&String> = vars.keys().collect();
    names.sort();

    let mut resolved = VariableMapping::with_capacity(vars.len());
    for name in names {
        let mut path = vec![name.clone()];
        let expanded = resolve_value(&vars[name], vars, &mut path)?;
        resolved.insert(name.clone(), expanded);
    }

    Ok(resolved)
}

/// Expand one value, carrying the ordered chain of names currently
/// being resolved. The chain doubles as the cycle-membership check and
/// as the text of the cycle diagnostic. The cycle check runs before the
/// depth check so a true cycle always reports as one.
fn resolve_value(
    value: &str,
    vars: &VariableMapping,
    path: &mut Vec<String>,
) -> crate::Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut last = 0;

    for caps in REFERENCE.captures_iter(value) {
        let token = caps.get(0).expect("regex match has a full capture");
        let name = &caps[1];

        out.push_str(&value[last..token.start()]);
        last = token.end();

        let Some(referenced) = vars.get(name) else {
            // Unknown name: keep the reference verbatim.
            out.push_str(token.as_str());
            continue;
        };

        if path.iter().any(|seen| seen == name) {
            let chain = path
                .iter()
                .map(String::as_str)
                .chain([name])
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(crate::Error::CyclicReference { chain });
        }

        if path.len() >= MAX_INTERPOLATION_DEPTH {
            return Err(crate::Error::InterpolationTooDeep {
                name: name.to_string(),
                limit: MAX_INTERPOLATION_DEPTH,
            });
        }

        path.push(name.to_string());
        let expanded = resolve_value(referenced, vars, path)?;
        path.pop();
        out.push_str(&expanded);
    }

    out.push_str(&value[last..]);
    Ok(out)
}
