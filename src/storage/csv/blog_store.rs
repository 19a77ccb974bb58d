use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::domain::BlogEntry;
use crate::errors::ScrapeResult;
use crate::storage::csv::file::write_atomic;
use crate::storage::traits::BlogStore;

pub struct CsvBlogStore {
    path: PathBuf,
}

impl CsvBlogStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlogStore for CsvBlogStore {
    fn save(&self, entries: &[BlogEntry]) -> ScrapeResult<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(["name", "url"])?;
        for entry in entries {
            writer.serialize(entry)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        write_atomic(&self.path, &bytes)
    }
}
