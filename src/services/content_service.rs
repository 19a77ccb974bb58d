use std::time::{Duration, Instant};

use crate::browser::{Browser, BrowserSession};
use crate::config::Config;
use crate::domain::{ArticleRecord, RunSummary, ScrapeState};
use crate::errors::ScrapeResult;
use crate::services::field_extractor::scrape_article;
use crate::storage::traits::ArticleStore;

#[derive(Debug, Clone, Copy)]
pub struct ContentSettings {
    pub wait_timeout: Duration,
    pub flush_every: usize,
}

impl From<&Config> for ContentSettings {
    fn from(config: &Config) -> Self {
        Self {
            wait_timeout: config.wait_timeout,
            flush_every: config.flush_every,
        }
    }
}

pub struct ContentService<S: ArticleStore> {
    store: S,
    settings: ContentSettings,
}

impl<S: ArticleStore> ContentService<S> {
    pub fn new(store: S, settings: ContentSettings) -> Self {
        Self {
            store,
            settings: ContentSettings {
                flush_every: settings.flush_every.max(1),
                ..settings
            },
        }
    }

    /// Load the table and report how much of it is left to do
    pub fn prepare(&self) -> ScrapeResult<Vec<ArticleRecord>> {
        let records = self.store.load()?;
        let scraped = records
            .iter()
            .filter(|r| r.state() == ScrapeState::Scraped)
            .count();

        log::info!(
            "Found {} articles already scraped, {} articles remaining.",
            scraped,
            records.len() - scraped
        );

        Ok(records)
    }

    /// Visit every pending row once, in table order, flushing as it goes.
    ///
    /// A row whose scrape fails is left exactly as it was.
    pub fn scrape_pending<B: Browser + ?Sized>(
        &self,
        records: &mut [ArticleRecord],
        browser: &mut B,
    ) -> RunSummary {
        let states: Vec<ScrapeState> = records.iter().map(ArticleRecord::state).collect();
        let started = Instant::now();
        let mut summary = RunSummary::start();

        for index in 0..records.len() {
            if states[index] == ScrapeState::Scraped {
                summary.skipped_scraped += 1;
                continue;
            }

            let Some(url) = records[index].target_url().map(str::to_string) else {
                log::debug!("Row {} has no usable article_url, skipping", index);
                summary.skipped_invalid += 1;
                continue;
            };

            match scrape_article(&mut *browser, &url, self.settings.wait_timeout) {
                Ok(fields) => {
                    records[index].apply(fields);
                    summary.scraped += 1;

                    if summary.scraped % self.settings.flush_every == 0 {
                        match self.store.save(records) {
                            Ok(()) => summary.flushes += 1,
                            Err(e) => log::warn!("Periodic flush failed: {}", e),
                        }
                        let elapsed = started.elapsed().as_secs_f64();
                        log::info!(
                            "Progress: {} scraped, {} failed, {:.2} articles/sec",
                            summary.scraped,
                            summary.failed,
                            summary.rate(elapsed)
                        );
                    }

                    log::info!("Scraped: {}", url);
                }
                Err(e) => {
                    summary.failed += 1;
                    log::warn!("Error scraping {}: {}", url, e);
                }
            }
        }

        summary
    }

    /// Scrape the pending rows, release the session, then flush once more
    pub fn run<B: Browser>(
        &self,
        mut records: Vec<ArticleRecord>,
        mut session: BrowserSession<B>,
    ) -> ScrapeResult<RunSummary> {
        let mut summary = self.scrape_pending(&mut records, &mut *session);

        session.close()?;

        self.store.save(&records)?;
        summary.flushes += 1;

        let summary = summary.finish();
        log::info!(
            "Scraping complete. Total articles scraped: {}, failed: {}",
            summary.scraped,
            summary.failed
        );
        Ok(summary)
    }
}
