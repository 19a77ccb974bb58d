use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters returned by one pass of the content scraper
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub scraped: usize,
    pub failed: usize,
    pub skipped_scraped: usize,
    pub skipped_invalid: usize,
    pub flushes: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            scraped: 0,
            failed: 0,
            skipped_scraped: 0,
            skipped_invalid: 0,
            flushes: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn attempted(&self) -> usize {
        self.scraped + self.failed
    }

    /// Successful scrapes per second of wall-clock time
    pub fn rate(&self, elapsed_secs: f64) -> f64 {
        if elapsed_secs > 0.0 {
            self.scraped as f64 / elapsed_secs
        } else {
            0.0
        }
    }
}

/// Offline view of the article table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub total: usize,
    pub scraped: usize,
    pub pending: usize,
    pub invalid_url: usize,
}
