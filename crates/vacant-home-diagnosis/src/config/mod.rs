use std::env;
use std::fmt;
use std::fs::File;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::diagnosis::{
    CatalogError, DiagnosisEngine, DiagnosisPolicy, PolicyError, PolicyPreset, QuestionCatalog,
    ResultCatalog,
};

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
    pub diagnosis: DiagnosisConfig,
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

        let preset = match env::var("DIAGNOSIS_POLICY") {
            Ok(value) => value
                .parse::<PolicyPreset>()
                .map_err(|source| ConfigError::InvalidPolicy { value, source })?,
            Err(_) => PolicyPreset::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            diagnosis: DiagnosisConfig {
                preset,
                policy_file: optional_path("DIAGNOSIS_POLICY_FILE"),
                questions_file: optional_path("DIAGNOSIS_QUESTIONS_FILE"),
                results_file: optional_path("DIAGNOSIS_RESULTS_FILE"),
            },
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the catalogs and cascade policy come from. Files override the built-in data.
#[derive(Debug, Clone, Default)]
pub struct DiagnosisConfig {
    pub preset: PolicyPreset,
    pub policy_file: Option<PathBuf>,
    pub questions_file: Option<PathBuf>,
    pub results_file: Option<PathBuf>,
}

impl DiagnosisConfig {
    pub fn build_engine(&self) -> Result<DiagnosisEngine, ConfigError> {
        let questions = match &self.questions_file {
            Some(path) => QuestionCatalog::from_reader(open(path)?)
                .map_err(|source| ConfigError::Catalog {
                    path: path.clone(),
                    source,
                })?,
            None => QuestionCatalog::standard(),
        };

        let results = match &self.results_file {
            Some(path) => {
                ResultCatalog::from_reader(open(path)?).map_err(|source| ConfigError::Catalog {
                    path: path.clone(),
                    source,
                })?
            }
            None => ResultCatalog::standard(),
        };

        let policy = match &self.policy_file {
            Some(path) => DiagnosisPolicy::from_reader(open(path)?).map_err(|source| {
                ConfigError::PolicyFile {
                    path: path.clone(),
                    source,
                }
            })?,
            None => DiagnosisPolicy::preset(self.preset),
        };

        Ok(DiagnosisEngine::new(questions, results, policy))
    }
}

fn open(path: &PathBuf) -> Result<File, ConfigError> {
    File::open(path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidPolicy {
        value: String,
        source: PolicyError,
    },
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },
    PolicyFile {
        path: PathBuf,
        source: PolicyError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPolicy { value, .. } => write!(
                f,
                "DIAGNOSIS_POLICY '{}' must be dual_threshold or single_threshold",
                value
            ),
            ConfigError::Read { path, .. } => write!(f, "unable to read {}", path.display()),
            ConfigError::Catalog { path, source } => {
                write!(f, "invalid catalog {}: {}", path.display(), source)
            }
            ConfigError::PolicyFile { path, source } => {
                write!(f, "invalid policy {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPolicy { source, .. } => Some(source),
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Catalog { source, .. } => Some(source),
            ConfigError::PolicyFile { source, .. } => Some(source),
        }
    }
}
