use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported browser backend: {0}")]
    UnsupportedBrowser(String),

    // Navigation errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} while loading {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Timed out after {timeout:?} waiting for '{selector}'")]
    Timeout { selector: String, timeout: Duration },

    // Page errors
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("No page loaded in the current browsing context")]
    NoPageLoaded,

    // Session errors
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("No such browsing context: {0}")]
    NoSuchContext(usize),

    #[error("No browsing context is selected")]
    NoCurrentContext,

    // Storage errors
    #[error("Article table not found: {0}")]
    MissingTable(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Failure of a single field lookup. Recovered locally as an empty value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no element matches '{0}'")]
    Missing(String),

    #[error("element '{0}' has no usable text")]
    Empty(String),
}

impl From<ScrapeError> for ExtractError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::ElementNotFound(selector) | ScrapeError::InvalidSelector(selector) => {
                ExtractError::Missing(selector)
            }
            other => ExtractError::Missing(other.to_string()),
        }
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;
