use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("'{value}' is not a {dimension} present in the dataset")]
    UnknownOption {
        dimension: &'static str,
        value: String,
    },
}
