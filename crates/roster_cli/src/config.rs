//! Environment-driven CLI configuration.
//!
//! Keys:
//! - `ROSTER_DB_PATH`: SQLite file, defaults to `<temp_dir>/roster.sqlite3`.
//! - `ROSTER_LOG_LEVEL`: defaults to `roster_core::default_log_level()`.
//! - `ROSTER_LOG_DIR`: absolute directory for rolling log files; stderr when unset.
//!
//! Blank values count as unset.

use std::path::PathBuf;

const DB_PATH_KEY: &str = "ROSTER_DB_PATH";
const LOG_LEVEL_KEY: &str = "ROSTER_LOG_LEVEL";
const LOG_DIR_KEY: &str = "ROSTER_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_KEY)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_KEY)
                .unwrap_or_else(|| roster_core::default_log_level().to_string()),
            log_dir: read(LOG_DIR_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("roster.sqlite3")
        );
        assert_eq!(config.log_level, roster_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_are_trimmed_and_blank_ones_ignored() {
        let config = config_from(&[
            ("ROSTER_DB_PATH", " /var/lib/roster.db "),
            ("ROSTER_LOG_LEVEL", "warn"),
            ("ROSTER_LOG_DIR", "   "),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/roster.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }
}
