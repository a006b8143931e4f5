// src/config.rs

use std::{env, fmt};

use url::Url;

/// Front-ends allowed to call the API when `CORS_ORIGINS` is not set.
const DEFAULT_CORS_ORIGINS: &str =
    "https://codequestgamestmu.netlify.app,https://codequestgameadminstmu.netlify.app";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CHAPTER_COUNT: i32 = 14;
/// Upper bound on `CHAPTER_COUNT`; every grouped listing materializes this many buckets.
const MAX_CHAPTER_COUNT: i32 = 1_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Origins allowed by the CORS layer (credentials enabled).
    pub cors_origins: Vec<String>,
    /// Chapters `1..=chapter_count` always appear in the grouped listing.
    pub chapter_count: i32,
    pub rust_log: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has invalid value '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        )?;

        let chapter_count = match env::var("CHAPTER_COUNT") {
            Ok(raw) => parse_chapter_count(&raw)?,
            Err(_) => DEFAULT_CHAPTER_COUNT,
        };

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            port,
            cors_origins,
            chapter_count,
            rust_log,
        })
    }
}

/// Splits a comma-separated origin list, rejecting anything that is not an absolute URL.
/// Trailing slashes are dropped since browsers send the bare origin.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            Url::parse(origin)
                .ok()
                .filter(|u| u.has_host())
                .map(|_| origin.trim_end_matches('/').to_string())
                .ok_or_else(|| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                })
        })
        .collect()
}

fn parse_chapter_count(raw: &str) -> Result<i32, ConfigError> {
    match raw.trim().parse::<i32>() {
        Ok(n) if (1..=MAX_CHAPTER_COUNT).contains(&n) => Ok(n),
        _ => Err(ConfigError::Invalid {
            key: "CHAPTER_COUNT",
            value: raw.to_string(),
        }),
    }
}
