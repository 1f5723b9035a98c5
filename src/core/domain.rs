use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";
pub const DEVELOPMENT: &str = "Development";

// Configuration abstracts config options for the library api; keys follow the
// appsettings layout, e.g. {"Database": {"ConnectionString": "..."}}
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase", default)]
pub struct Configuration {
    pub environment: String,
    pub urls: String,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase", default)]
pub struct DatabaseSettings {
    pub connection_string: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthSettings {
    pub api_key: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            connection_string: "Data Source=./library.db".to_string(),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            environment: DEVELOPMENT.to_string(),
            urls: "127.0.0.1:5000".to_string(),
            database: DatabaseSettings::default(),
            auth: AuthSettings::default(),
        }
    }
}

impl Configuration {
    pub fn new(connection_string: &str) -> Self {
        Configuration {
            database: DatabaseSettings { connection_string: connection_string.to_string() },
            ..Default::default()
        }
    }

    /// Defaults, then the settings file, then `LIBRARY_*` environment variables.
    pub fn load() -> LibraryResult<Self> {
        let settings_file = std::env::var("LIBRARY_SETTINGS_FILE")
            .unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
        let mut config = Self::from_file(Path::new(&settings_file))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> LibraryResult<Self> {
        if !path.exists() {
            return Ok(Configuration::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw).map_err(|err| LibraryError::configuration(
            format!("invalid settings file {}: {}", path.display(), err).as_str()))
    }

    pub fn from_json(raw: &str) -> LibraryResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(environment) = lookup("LIBRARY_ENVIRONMENT") {
            self.environment = environment;
        }
        if let Some(urls) = lookup("LIBRARY_URLS") {
            self.urls = urls;
        }
        if let Some(connection_string) = lookup("LIBRARY_DATABASE_CONNECTION_STRING") {
            self.database.connection_string = connection_string;
        }
        if let Some(api_key) = lookup("LIBRARY_API_KEY") {
            self.auth.api_key = if api_key.is_empty() { None } else { Some(api_key) };
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case(DEVELOPMENT)
    }
}
