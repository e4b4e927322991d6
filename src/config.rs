//! Service configuration read from the environment.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `SALES_BIND_ADDR`, default `127.0.0.1:3000`.
    pub bind_addr: String,
    /// `SALES_INPUT_FILE`.  When set the binary prints the report for
    /// this file and exits instead of serving HTTP.
    pub input_file: Option<PathBuf>,
    /// `SALES_LOG_JSON`, default false.
    pub log_json: bool,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_map(&env::vars().collect())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            bind_addr: get(vars, "SALES_BIND_ADDR", "127.0.0.1:3000"),
            input_file: optional(vars, "SALES_INPUT_FILE").map(PathBuf::from),
            log_json: flag(vars, "SALES_LOG_JSON")?,
        })
    }
}

fn get(vars: &HashMap<String, String>, key: &str, default: &str) -> String {
    optional(vars, key).unwrap_or_else(|| default.to_string())
}

fn optional(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag(vars: &HashMap<String, String>, key: &str) -> Result<bool> {
    match optional(vars, key).as_deref() {
        None => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("no") => Ok(false),
        Some(other) => bail!("{key} must be a boolean, got {other:?}"),
    }
}
