use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{ScrapeError, ScrapeResult};

pub const DEFAULT_INDEX_URL: &str = "https://blogs.lse.ac.uk/lse-research-blogs/";
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FLUSH_EVERY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Http,
    Chrome,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Http => "http",
            BrowserKind::Chrome => "chrome",
        }
    }
}

impl std::str::FromStr for BrowserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "reqwest" => Ok(BrowserKind::Http),
            "chrome" | "chromium" => Ok(BrowserKind::Chrome),
            _ => Err(s.to_string()),
        }
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub index_url: String,
    pub wait_timeout: Duration,
    pub flush_every: usize,
    pub browser: BrowserKind,
    pub headless: bool,
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            index_url: DEFAULT_INDEX_URL.to_string(),
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            flush_every: DEFAULT_FLUSH_EVERY,
            browser: BrowserKind::Http,
            headless: true,
            user_agent: None,
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> ScrapeResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> ScrapeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("BLOGSCRAPE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let index_url = lookup("BLOGSCRAPE_INDEX_URL").unwrap_or(defaults.index_url);
        url::Url::parse(&index_url)
            .map_err(|e| ScrapeError::Config(format!("BLOGSCRAPE_INDEX_URL: {}", e)))?;

        let wait_timeout = match lookup("BLOGSCRAPE_WAIT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                ScrapeError::Config(format!("BLOGSCRAPE_WAIT_TIMEOUT_SECS: not a number: {}", raw))
            })?),
            None => defaults.wait_timeout,
        };

        let flush_every = match lookup("BLOGSCRAPE_FLUSH_EVERY") {
            Some(raw) => {
                let n: usize = raw.trim().parse().map_err(|_| {
                    ScrapeError::Config(format!("BLOGSCRAPE_FLUSH_EVERY: not a number: {}", raw))
                })?;
                if n == 0 {
                    return Err(ScrapeError::Config(
                        "BLOGSCRAPE_FLUSH_EVERY must be greater than zero".to_string(),
                    ));
                }
                n
            }
            None => defaults.flush_every,
        };

        let browser = match lookup("BLOGSCRAPE_BROWSER") {
            Some(raw) => raw
                .parse::<BrowserKind>()
                .map_err(ScrapeError::UnsupportedBrowser)?,
            None => defaults.browser,
        };

        let headless = match lookup("BLOGSCRAPE_HEADLESS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ScrapeError::Config(format!("BLOGSCRAPE_HEADLESS: not a boolean: {}", raw))
            })?,
            None => defaults.headless,
        };

        let user_agent = lookup("BLOGSCRAPE_USER_AGENT").filter(|ua| !ua.trim().is_empty());

        Ok(Self {
            data_dir,
            index_url,
            wait_timeout,
            flush_every,
            browser,
            headless,
            user_agent,
        })
    }

    pub fn articles_path(&self) -> PathBuf {
        self.data_dir.join("articles.csv")
    }

    pub fn blogs_path(&self) -> PathBuf {
        self.data_dir.join("blogs.csv")
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
