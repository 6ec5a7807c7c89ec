use std::env::VarError;

pub const DATABASE_URL_ENV: &str = "PORTAL_DATABASE_URL";
pub const FALLBACK_DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const MAX_CONNECTIONS_ENV: &str = "PORTAL_DB_MAX_CONNECTIONS";
pub const AUTO_MIGRATE_ENV: &str = "PORTAL_DB_AUTO_MIGRATE";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://portal.sqlite?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Apply pending migrations when connecting.
    pub auto_migrate: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            auto_migrate: true,
        }
    }
}

impl DbConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let database_url = read_string(&lookup, DATABASE_URL_ENV)
            .or_else(|| read_string(&lookup, FALLBACK_DATABASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Self {
            database_url,
            max_connections: read_max_connections(&lookup),
            auto_migrate: read_bool(&lookup, AUTO_MIGRATE_ENV, true),
        }
    }
}

fn read_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) | Err(VarError::NotPresent) => None,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to read {name}; ignoring");
            None
        }
    }
}

fn read_max_connections<F>(lookup: &F) -> u32
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let Some(raw) = read_string(lookup, MAX_CONNECTIONS_ENV) else {
        return DEFAULT_MAX_CONNECTIONS;
    };

    match raw.parse::<u32>() {
        Ok(0) => {
            tracing::warn!("{MAX_CONNECTIONS_ENV} must be positive; using default");
            DEFAULT_MAX_CONNECTIONS
        }
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(value = %raw, error = %err, "Invalid {MAX_CONNECTIONS_ENV}; using default");
            DEFAULT_MAX_CONNECTIONS
        }
    }
}

fn read_bool<F>(lookup: &F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let Some(raw) = read_string(lookup, name) else {
        return default;
    };

    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(value = %raw, "Invalid {name}; using default");
            default
        }
    }
}
