pub mod traits;
pub mod csv;

pub use traits::{ArticleStore, BlogStore};
pub use self::csv::{CsvArticleStore, CsvBlogStore};
