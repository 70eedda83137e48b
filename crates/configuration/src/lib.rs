use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    Config, DatasetSettings, LoggingSettings, OutputFormat, OutputSettings, SelectionDefaults,
};

/// The file consulted when no explicit configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration.
///
/// Sources, lowest precedence first:
/// 1. The TOML file at `path`, or `config.toml` in the working directory.
///    An explicit `path` must exist; the default file is optional.
/// 2. Environment variables prefixed with `SHELFWISE`, using `__` between
///    section and key (e.g. `SHELFWISE_DATASET__PATH`).
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_with_env(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("SHELFWISE")
        .prefix_separator("_")
        .separator("__")
}

fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.logging.file_prefix.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.file_prefix must not be empty".to_string(),
        ));
    }
    if tracing_subscriber::EnvFilter::try_new(&config.logging.level).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "logging.level '{}' is not a valid filter directive",
            config.logging.level
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_toml(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_every_section_from_file() {
        let file = write_toml(
            r#"
[dataset]
path = "sales.csv"

[defaults]
stores = ["A", "B"]
start_date = "2024-01-01"
end_date = "2024-01-31"

[logging]
level = "debug"

[output]
format = "json"
"#,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.dataset.path, Path::new("sales.csv"));
        assert_eq!(config.defaults.stores, Some(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(config.defaults.categories, None);
        assert_eq!(config.defaults.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(config.defaults.end_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let file = write_toml("[dataset]\npath = \"other.csv\"\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.defaults.start_date.is_none());
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn partial_logging_section_keeps_other_defaults() {
        let file = write_toml("[logging]\nlevel = \"warn\"\n\n[dataset]\n");
        let config = load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.file_prefix, "shelfwise.log");
        assert_eq!(config.dataset.path, Path::new("data/retail_sales.csv"));
    }

    #[test]
    fn single_env_var_without_file_overrides_one_key() {
        let config = load_with_env(None, env(&[("SHELFWISE_LOGGING__LEVEL", "debug")])).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_prefix, "shelfwise.log");
        assert!(config.logging.directory.is_none());
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn env_overrides_file_values() {
        let file = write_toml("[dataset]\npath = \"from_file.csv\"\n[output]\nformat = \"table\"\n");
        let vars = [
            ("SHELFWISE_DATASET__PATH", "from_env.csv"),
            ("SHELFWISE_OUTPUT__FORMAT", "json"),
        ];
        let config = load_with_env(Some(file.path()), env(&vars)).unwrap();
        assert_eq!(config.dataset.path, Path::new("from_env.csv"));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = load_config(Some(Path::new("definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn rejects_empty_log_file_prefix() {
        let file = write_toml("[logging]\nlevel = \"info\"\nfile_prefix = \"  \"\n");
        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
