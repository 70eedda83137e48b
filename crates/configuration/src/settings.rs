use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing sections fall back to
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub defaults: SelectionDefaults,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where the sales data lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Path to the CSV file holding the sales records.
    pub path: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/retail_sales.csv"),
        }
    }
}

/// Default filter values applied when the user does not pass the matching flag.
///
/// `None` means "every value present in the dataset" for the sets, and the
/// dataset's own bound for the dates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionDefaults {
    pub stores: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub shelf_levels: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Logging output settings. Keys left out keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level filter. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "shelfwise.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How a dashboard report is handed to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text tables.
    #[default]
    Table,
    /// A single JSON document for an external chart renderer.
    Json,
}
