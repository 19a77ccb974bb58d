mod file;
pub mod article_store;
pub mod blog_store;

pub use article_store::CsvArticleStore;
pub use blog_store::CsvBlogStore;
