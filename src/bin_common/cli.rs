//! CLI utilities for binaries
//!
//! Argument handling and plan-path resolution shared by the executables.

use anyhow::{bail, Result};
use max_client::order_state;
use std::path::PathBuf;

/// Environment variable naming a YAML ladder plan
pub const PLAN_PATH_VAR: &str = "LADDER_PLAN_PATH";

/// Order states queried when none are given on the command line
pub const DEFAULT_HISTORY_STATES: &[&str] = &[order_state::WAIT];

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Plan path from `--plan <path>` or `--plan=<path>`, else from `env_value`
///
/// The command line wins over the environment.
pub fn plan_path(args: &[String], env_value: Option<String>) -> Result<Option<PathBuf>> {
    let mut from_args = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--plan" {
            match iter.next() {
                Some(path) => from_args = Some(PathBuf::from(path)),
                None => bail!("--plan requires a path"),
            }
        } else if let Some(path) = arg.strip_prefix("--plan=") {
            from_args = Some(PathBuf::from(path));
        } else {
            bail!("unexpected argument '{}' (usage: max-ladder [--plan <path>])", arg);
        }
    }

    Ok(from_args.or_else(|| {
        env_value
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }))
}

/// Plan path for the current process (`--plan`, then `LADDER_PLAN_PATH`)
pub fn load_plan_path_from_env(args: &[String]) -> Result<Option<PathBuf>> {
    plan_path(args, std::env::var(PLAN_PATH_VAR).ok())
}

/// `<pair> [state ...]` for the order history binary
pub fn history_args(args: &[String]) -> Result<(String, Vec<String>)> {
    let Some((pair, states)) = args.split_first() else {
        bail!("usage: order-history <pair> [state ...]");
    };

    let states = if states.is_empty() {
        DEFAULT_HISTORY_STATES.iter().map(|s| s.to_string()).collect()
    } else {
        states.iter().map(|s| s.to_lowercase()).collect()
    };

    Ok((pair.to_lowercase(), states))
}
