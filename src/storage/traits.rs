use crate::domain::{ArticleRecord, BlogEntry};
use crate::errors::ScrapeResult;

#[cfg_attr(test, mockall::automock)]
pub trait ArticleStore {
    /// Read the whole table into memory
    fn load(&self) -> ScrapeResult<Vec<ArticleRecord>>;
    /// Replace the stored table with `records`
    fn save(&self, records: &[ArticleRecord]) -> ScrapeResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait BlogStore {
    fn save(&self, entries: &[BlogEntry]) -> ScrapeResult<()>;
}
