use std::str::FromStr;

use casting_core::patch::PatchSemantics;

use crate::auth::jwt::AuthConfig;

/// Which [`casting_db::store::RecordStore`] implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "unknown store backend '{other}', expected 'postgres' or 'memory'"
            )),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the auth key material have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How partial updates treat present-but-falsy fields.
    pub patch_semantics: PatchSemantics,
    /// Record store implementation (default: `postgres`).
    pub store_backend: StoreBackend,
    /// Insert the sample movies and actors at startup when missing.
    pub seed_sample_data: bool,
    /// Bearer-token verification settings.
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `8080`     |
    /// | `CORS_ORIGINS`         | `*`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`       |
    /// | `PATCH_SEMANTICS`      | `presence` |
    /// | `STORE_BACKEND`        | `postgres` |
    /// | `SEED_SAMPLE_DATA`     | `true`     |
    ///
    /// See [`AuthConfig::from_env`] for the `AUTH_*` variables.
    ///
    /// # Panics
    ///
    /// Panics on any unparseable value; misconfiguration should fail fast.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let patch_semantics: PatchSemantics = std::env::var("PATCH_SEMANTICS")
            .unwrap_or_else(|_| "presence".into())
            .parse()
            .unwrap_or_else(|e| panic!("PATCH_SEMANTICS: {e}"));

        let store_backend: StoreBackend = std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("STORE_BACKEND: {e}"));

        let seed_sample_data = parse_bool(
            "SEED_SAMPLE_DATA",
            &std::env::var("SEED_SAMPLE_DATA").unwrap_or_else(|_| "true".into()),
        );

        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            patch_semantics,
            store_backend,
            seed_sample_data,
            auth,
        }
    }

    /// True when `CORS_ORIGINS` allows every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_bool(name: &str, value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => panic!("{name} must be a boolean, got '{other}'"),
    }
}
