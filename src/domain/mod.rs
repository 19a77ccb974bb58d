pub mod record;
pub mod blog;
pub mod summary;

pub use record::{ArticleRecord, ScrapeState, ScrapedFields};
pub use blog::{BlogEntry, DirectoryReport, ResolutionTier};
pub use summary::{RunSummary, TableStatus};
