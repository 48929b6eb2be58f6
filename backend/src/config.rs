use clap::Parser;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Command line overrides for the environment configuration
#[derive(Debug, Default, Parser)]
#[command(name = "rps-arena", about = "Rock-paper-scissors arena server", version)]
pub struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub stats: StatsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub rust_log: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatsConfig {
    pub backend: StatsBackend,
    pub track_leaderboard: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatsBackend {
    Redis,
    Memory,
}

impl FromStr for StatsBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(StatsBackend::Redis),
            "memory" => Ok(StatsBackend::Memory),
            other => Err(anyhow::anyhow!("unknown STATS_BACKEND: {}", other)),
        }
    }
}

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";
const DEFAULT_LOG_FILTER: &str = "rps_arena=info,actix_web=info";

impl Config {
    /// Load `.env` and read the environment
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Apply command line overrides on top of the environment values
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(host) = cli.host {
            self.server.host = host;
        }
        self
    }

    fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", raw, e))?,
            None => DEFAULT_PORT,
        };
        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let rust_log = var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let redis_url = var("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());
        let backend = match var("STATS_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StatsBackend::Redis,
        };
        let track_leaderboard = match var("TRACK_LEADERBOARD") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| anyhow::anyhow!("invalid TRACK_LEADERBOARD: {:?}", raw))?,
            None => true,
        };

        Ok(Config {
            server: ServerConfig {
                port,
                host,
                rust_log,
            },
            redis: RedisConfig { url: redis_url },
            stats: StatsConfig {
                backend,
                track_leaderboard,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
