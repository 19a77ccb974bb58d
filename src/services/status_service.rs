use crate::domain::{ArticleRecord, ScrapeState, TableStatus};
use crate::errors::ScrapeResult;
use crate::storage::traits::ArticleStore;

pub struct StatusService<S: ArticleStore> {
    store: S,
}

impl<S: ArticleStore> StatusService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn status(&self) -> ScrapeResult<TableStatus> {
        let records = self.store.load()?;
        Ok(Self::summarize(&records))
    }

    /// Pending rows without a usable URL count as invalid, not pending
    pub fn summarize(records: &[ArticleRecord]) -> TableStatus {
        let mut status = TableStatus {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.state() {
                ScrapeState::Scraped => status.scraped += 1,
                ScrapeState::Pending if record.target_url().is_none() => status.invalid_url += 1,
                ScrapeState::Pending => status.pending += 1,
            }
        }

        status
    }
}
