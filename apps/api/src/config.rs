use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_TABLE: &str = "cv_details";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. When unset, records live in memory only.
    pub database_url: Option<String>,
    pub store: StoreConfig,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            store: optional_env("CV_TABLE")
                .map(StoreConfig::new)
                .transpose()?
                .unwrap_or_default(),
            upload_dir: optional_env("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Settings handed to the record store at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    table: String,
}

impl StoreConfig {
    /// The table name is spliced into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` is accepted.
    pub fn new(table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        if !is_identifier(&table) {
            bail!("CV_TABLE '{table}' is not a valid SQL identifier");
        }
        Ok(StoreConfig { table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
