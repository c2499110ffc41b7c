use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

/// Server configuration, read once at startup and handed to the router.
#[derive(Debug, Clone, Parser)]
#[command(name = "kestrel")]
#[command(about = "Minimal HTTP/1.1 server with echo and file routes")]
pub struct Config {
    /// Address the listener binds to
    #[arg(long = "listen", env = "LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Base directory for the /files/ routes; file routes answer 404 without it
    #[arg(long)]
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Parses the process arguments (and `LISTEN` from the environment).
    pub fn load() -> Self {
        Config::parse()
    }

    pub fn new(listen_addr: impl Into<String>, directory: Option<PathBuf>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            directory,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_LISTEN_ADDR, None)
    }
}
