use std::path::PathBuf;

use crate::error::AppError;

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub logs_path: PathBuf,
    pub listeners_path: PathBuf,
    pub log_filter: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            logs_path: PathBuf::from("logs"),
            listeners_path: PathBuf::from("listeners.json"),
            log_filter: None,
        }
    }

    /// Overrides the defaults with `LOGS_PATH`, `LISTENERS_PATH` and `LOG_FILTER`.
    pub fn load(&mut self) -> Result<(), AppError> {
        if let Some(path) = read_var("LOGS_PATH")? {
            self.logs_path = PathBuf::from(path);
        }
        if let Some(path) = read_var("LISTENERS_PATH")? {
            self.listeners_path = PathBuf::from(path);
        }
        if let Some(filter) = read_var("LOG_FILTER")? {
            self.log_filter = Some(filter);
        }
        Ok(())
    }
}

fn read_var(key: &str) -> Result<Option<String>, AppError> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(AppError::MissingConfig {
            key: key.to_string(),
        }),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(AppError::ConfigurationError {
            msg: format!("{key} is not valid unicode"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn clear_env() {
        unsafe {
            std::env::remove_var("LOGS_PATH");
            std::env::remove_var("LISTENERS_PATH");
            std::env::remove_var("LOG_FILTER");
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();

        let mut config = Config::new();
        config.load().unwrap();

        assert_eq!(config.logs_path, PathBuf::from("logs"));
        assert_eq!(config.listeners_path, PathBuf::from("listeners.json"));
        assert_eq!(config.log_filter, None);
    }

    #[test]
    #[serial]
    fn test_env_overrides_defaults() {
        clear_env();
        unsafe {
            std::env::set_var("LISTENERS_PATH", "/etc/cms/listeners.json");
            std::env::set_var("LOG_FILTER", "cms_core=debug");
        }

        let mut config = Config::new();
        config.load().unwrap();
        clear_env();

        assert_eq!(config.logs_path, PathBuf::from("logs"));
        assert_eq!(
            config.listeners_path,
            PathBuf::from("/etc/cms/listeners.json")
        );
        assert_eq!(config.log_filter.as_deref(), Some("cms_core=debug"));
    }

    #[test]
    #[serial]
    fn test_blank_value_is_rejected() {
        clear_env();
        unsafe {
            std::env::set_var("LOGS_PATH", " ");
        }

        let result = Config::new().load();
        clear_env();

        assert!(matches!(
            result,
            Err(AppError::MissingConfig { key }) if key == "LOGS_PATH"
        ));
    }
}
