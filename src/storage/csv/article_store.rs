use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};

use crate::domain::ArticleRecord;
use crate::errors::ScrapeResult;
use crate::storage::csv::file::write_atomic;
use crate::storage::traits::ArticleStore;

/// Column order of the article table on disk
pub const ARTICLE_COLUMNS: [&str; 10] = [
    "blog_name",
    "blog_url",
    "article_title",
    "article_url",
    "article_date",
    "author",
    "reading_time",
    "shares",
    "comments",
    "content",
];

pub struct CsvArticleStore {
    path: PathBuf,
}

impl CsvArticleStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header of the table currently on disk, empty when there is none
    fn existing_columns(&self) -> ScrapeResult<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        Ok(reader.headers()?.iter().map(str::to_string).collect())
    }

    /// Existing column order, then any article columns it lacks, then
    /// extra columns only the records know about
    fn output_columns(&self, records: &[ArticleRecord]) -> ScrapeResult<Vec<String>> {
        let mut columns = self.existing_columns()?;
        for column in ARTICLE_COLUMNS {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.to_string());
            }
        }
        for record in records {
            for column in record.extra.keys() {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }
        Ok(columns)
    }
}

impl ArticleStore for CsvArticleStore {
    fn load(&self) -> ScrapeResult<Vec<ArticleRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record = ArticleRecord::default();
            for (column, value) in headers.iter().zip(row.iter()) {
                record.set_column(column, value);
            }
            records.push(record);
        }
        Ok(records)
    }

    fn save(&self, records: &[ArticleRecord]) -> ScrapeResult<()> {
        let columns = self.output_columns(records)?;

        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&columns)?;
        for record in records {
            writer.write_record(columns.iter().map(|column| record.column(column)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        write_atomic(&self.path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScrapeState;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(contents: &str) -> (TempDir, CsvArticleStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("articles.csv");
        fs::write(&path, contents).unwrap();
        (dir, CsvArticleStore::new(path))
    }

    #[test]
    fn test_load_without_scraped_columns() {
        let (_dir, store) = store_with(
            "blog_name,blog_url,article_title,article_url,article_date\n\
             Politics,https://b.test,First,https://b.test/1,2024-01-02\n\
             Politics,https://b.test,Second,,2024-01-03\n",
        );

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].article_url.as_deref(), Some("https://b.test/1"));
        assert_eq!(records[0].author, "");
        assert_eq!(records[0].content, "");
        assert_eq!(records[0].state(), ScrapeState::Pending);
        assert_eq!(records[1].target_url(), None);
    }

    #[test]
    fn test_count_like_values_stay_text() {
        let (_dir, store) = store_with(
            "article_title,article_url,shares,comments,content\n\
             T,https://b.test/1,007,12,Body\n",
        );

        let records = store.load().unwrap();
        assert_eq!(records[0].shares, "007");
        assert_eq!(records[0].comments, "12");
        assert_eq!(records[0].state(), ScrapeState::Scraped);
    }

    #[test]
    fn test_save_then_load_keeps_multiline_content() {
        let dir = TempDir::new().unwrap();
        let store = CsvArticleStore::new(dir.path().join("nested").join("articles.csv"));

        let mut record = ArticleRecord::new("Quoted, \"title\"".to_string(), Some("https://b.test/1".to_string()))
            .with_blog("Politics".to_string(), "https://b.test".to_string());
        record.content = "First paragraph.\n\nSecond paragraph.".to_string();
        store.save(&[record.clone()]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![record]);
        assert!(!dir.path().join("nested").join("articles.csv.tmp").exists());
    }

    #[test]
    fn test_save_empty_table_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("articles.csv");
        let store = CsvArticleStore::new(&path);

        store.save(&[]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.trim_end(), ARTICLE_COLUMNS.join(","));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_keeps_unknown_columns_and_order() {
        let (dir, store) = store_with(
            "article_title,article_url,tags,content\n\
             T,https://b.test/1,politics;uk,\n",
        );

        let mut records = store.load().unwrap();
        assert_eq!(records[0].extra.get("tags").map(String::as_str), Some("politics;uk"));
        records[0].content = "Body".to_string();
        records[0].author = "Jane".to_string();
        store.save(&records).unwrap();

        let written = fs::read_to_string(dir.path().join("articles.csv")).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("article_title,article_url,tags,content,blog_name,blog_url,article_date,author,reading_time,shares,comments")
        );
        assert_eq!(lines.next(), Some("T,https://b.test/1,politics;uk,Body,,,,Jane,,,"));
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = CsvArticleStore::new(dir.path().join("absent.csv"));
        assert!(store.load().is_err());
    }
}
