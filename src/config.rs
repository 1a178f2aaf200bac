use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Task tracker with upcoming and past-due lists and per-task checklists.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// SQLite database URL. Defaults to a file under the user state directory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl Config {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_url(&self) -> anyhow::Result<String> {
        match &self.database_url {
            Some(url) => Ok(url.clone()),
            None => default_database_url(),
        }
    }
}

fn data_dir() -> anyhow::Result<PathBuf> {
    let state_dir = dirs::state_dir()
        .or_else(dirs::config_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/state")))
        .ok_or_else(|| anyhow::anyhow!("Could not find state directory"))?;

    Ok(state_dir.join("taskboard").join("data"))
}

/// `sqlite:` URL for the default database file, creating its directory.
pub fn default_database_url() -> anyhow::Result<String> {
    let db_path = data_dir()?;
    std::fs::create_dir_all(&db_path)
        .with_context(|| format!("Failed to create {}", db_path.display()))?;

    let db_file = db_path.join("taskboard.db");
    Ok(format!("sqlite:{}", db_file.display()))
}
