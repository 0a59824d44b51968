use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use vetrecords_core::assets::AssetResolver;

use crate::auth::jwt::JwtConfig;

/// Everything the server reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite URL, e.g. `sqlite://vetrecords.db?mode=rwc`.
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub assets: AssetConfig,
}

/// Where static and media files live, and how documents refer to them.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// URL prefix of bundled static files.
    pub static_url: String,
    /// Directories searched in order for static files.
    pub static_dirs: Vec<PathBuf>,
    /// URL prefix of user-provided media files.
    pub media_url: String,
    pub media_root: PathBuf,
    /// Logo printed at the top of visit-history reports. Empty disables it.
    pub report_logo_uri: String,
}

impl ServerConfig {
    /// Read the configuration, panicking on malformed values.
    ///
    /// | Env var                | Default                           |
    /// |------------------------|-----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                         |
    /// | `PORT`                 | `3000`                            |
    /// | `DATABASE_URL`         | `sqlite://vetrecords.db?mode=rwc` |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                              |
    ///
    /// JWT and asset settings are documented on [`JwtConfig::from_env`] and
    /// [`AssetConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            host: env_string("HOST", "0.0.0.0"),
            port: env_or("PORT", 3000),
            database_url: env_string("DATABASE_URL", "sqlite://vetrecords.db?mode=rwc"),
            cors_origins: split_list(&env_string("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            assets: AssetConfig::from_env(),
        }
    }
}

impl AssetConfig {
    /// | Env var            | Default                          |
    /// |--------------------|----------------------------------|
    /// | `STATIC_URL`       | `/static/`                       |
    /// | `STATICFILES_DIRS` | `static` (comma-separated list)  |
    /// | `MEDIA_URL`        | `/media/`                        |
    /// | `MEDIA_ROOT`       | `media`                          |
    /// | `REPORT_LOGO_URI`  | `/static/img/logo.png`           |
    pub fn from_env() -> Self {
        Self {
            static_url: env_string("STATIC_URL", "/static/"),
            static_dirs: split_list(&env_string("STATICFILES_DIRS", "static"))
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            media_url: env_string("MEDIA_URL", "/media/"),
            media_root: PathBuf::from(env_string("MEDIA_ROOT", "media")),
            report_logo_uri: env_string("REPORT_LOGO_URI", "/static/img/logo.png"),
        }
    }

    /// Build the resolver the PDF export uses for embedded images.
    pub fn resolver(&self) -> AssetResolver {
        AssetResolver::new(
            self.static_url.clone(),
            self.static_dirs.clone(),
            self.media_url.clone(),
            self.media_root.clone(),
        )
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse `key` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// When the variable is set but does not parse as `T`.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
