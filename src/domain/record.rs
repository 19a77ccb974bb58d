use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a record still needs a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeState {
    Pending,
    Scraped,
}

impl ScrapeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeState::Pending => "pending",
            ScrapeState::Scraped => "scraped",
        }
    }
}

impl std::fmt::Display for ScrapeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the article table. Every column is kept as text; columns
/// the scraper does not know about ride along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleRecord {
    pub blog_name: String,
    pub blog_url: String,
    pub article_title: String,
    pub article_url: Option<String>,
    pub article_date: String,
    pub author: String,
    pub reading_time: String,
    pub shares: String,
    pub comments: String,
    pub content: String,
    pub extra: BTreeMap<String, String>,
}

impl ArticleRecord {
    pub fn new(article_title: String, article_url: Option<String>) -> Self {
        Self {
            article_title,
            article_url,
            ..Default::default()
        }
    }

    pub fn with_blog(mut self, blog_name: String, blog_url: String) -> Self {
        self.blog_name = blog_name;
        self.blog_url = blog_url;
        self
    }

    pub fn with_date(mut self, article_date: String) -> Self {
        self.article_date = article_date;
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = content;
        self
    }

    /// Value of a named column; unknown columns read as empty
    pub fn column(&self, name: &str) -> &str {
        match name {
            "blog_name" => self.blog_name.as_str(),
            "blog_url" => self.blog_url.as_str(),
            "article_title" => self.article_title.as_str(),
            "article_url" => self.article_url.as_deref().unwrap_or_default(),
            "article_date" => self.article_date.as_str(),
            "author" => self.author.as_str(),
            "reading_time" => self.reading_time.as_str(),
            "shares" => self.shares.as_str(),
            "comments" => self.comments.as_str(),
            "content" => self.content.as_str(),
            other => self.extra.get(other).map(String::as_str).unwrap_or_default(),
        }
    }

    pub fn set_column(&mut self, name: &str, value: &str) {
        let value = value.to_string();
        match name {
            "blog_name" => self.blog_name = value,
            "blog_url" => self.blog_url = value,
            "article_title" => self.article_title = value,
            "article_url" => self.article_url = Some(value).filter(|url| !url.is_empty()),
            "article_date" => self.article_date = value,
            "author" => self.author = value,
            "reading_time" => self.reading_time = value,
            "shares" => self.shares = value,
            "comments" => self.comments = value,
            "content" => self.content = value,
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }

    pub fn state(&self) -> ScrapeState {
        if self.content.is_empty() {
            ScrapeState::Pending
        } else {
            ScrapeState::Scraped
        }
    }

    /// The URL to visit, if the row carries a usable one
    pub fn target_url(&self) -> Option<&str> {
        self.article_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Overwrite all five scraped columns, empty values included
    pub fn apply(&mut self, fields: ScrapedFields) {
        self.author = fields.author;
        self.reading_time = fields.reading_time;
        self.shares = fields.shares;
        self.comments = fields.comments;
        self.content = fields.content;
    }
}

/// The five values pulled from an article page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedFields {
    pub author: String,
    pub reading_time: String,
    pub shares: String,
    pub comments: String,
    pub content: String,
}
