use crate::finder::TierWindows;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub tiers: TierWindows,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        let weights_csv = env::var("FINDER_WEIGHTS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DataConfig::DEFAULT_WEIGHTS_CSV));
        let universities_csv = env::var("FINDER_UNIVERSITIES_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DataConfig::DEFAULT_UNIVERSITIES_CSV));

        let defaults = TierWindows::default();
        let tiers = TierWindows {
            ambitious: band_width("FINDER_AMBITIOUS_WIDTH", defaults.ambitious)?,
            target: band_width("FINDER_TARGET_WIDTH", defaults.target)?,
            safe: band_width("FINDER_SAFE_WIDTH", defaults.safe)?,
        };
        if tiers.target == 0 {
            return Err(ConfigError::EmptyTargetBand);
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            data: DataConfig {
                weights_csv,
                universities_csv,
            },
            tiers,
        })
    }
}

fn band_width(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidBandWidth { key }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Locations of the reference weight table and the university threshold table.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub weights_csv: PathBuf,
    pub universities_csv: PathBuf,
}

impl DataConfig {
    pub const DEFAULT_WEIGHTS_CSV: &'static str = "data/country_weights.csv";
    pub const DEFAULT_UNIVERSITIES_CSV: &'static str = "data/universities.csv";
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidBandWidth { key: &'static str },
    EmptyTargetBand,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBandWidth { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
            ConfigError::EmptyTargetBand => {
                write!(f, "FINDER_TARGET_WIDTH must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidBandWidth { .. }
            | ConfigError::EmptyTargetBand => None,
        }
    }
}
