use std::time::Duration;

use crate::browser::{Browser, Page};
use crate::domain::ScrapedFields;
use crate::errors::{ExtractError, ExtractResult, ScrapeResult};

pub const READY_SELECTOR: &str = ".main-container";
pub const AUTHOR_SELECTOR: &str = ".single-post__main-sidebar h3";
pub const READING_TIME_SELECTOR: &str = "p.reading-time";
pub const READING_TIME_PREFIX: &str = "Estimated reading time: ";
pub const COMMENTS_SELECTOR: &str = ".post-main-image__meta a[href=\"#comments\"]";
pub const META_SELECTOR: &str = ".post-main-image__meta";
pub const PARAGRAPH_SELECTOR: &str = ".post-content p";

/// Collapse a failed lookup into an empty value
pub fn or_empty(result: ExtractResult<String>) -> String {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Field lookup failed: {}", e);
            String::new()
        }
    }
}

fn first_token(text: &str, what: &str) -> ExtractResult<String> {
    text.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| ExtractError::Empty(what.to_string()))
}

pub fn extract_author(page: &Page) -> ExtractResult<String> {
    let heading = page.find_element(AUTHOR_SELECTOR)?;
    Ok(heading.text().trim().to_string())
}

pub fn extract_reading_time(page: &Page) -> ExtractResult<String> {
    let label = page.find_element(READING_TIME_SELECTOR)?;
    Ok(label.text().replace(READING_TIME_PREFIX, "").trim().to_string())
}

pub fn extract_comments(page: &Page) -> ExtractResult<String> {
    let anchor = page.find_element(COMMENTS_SELECTOR)?;
    first_token(anchor.text(), COMMENTS_SELECTOR)
}

pub fn extract_shares(page: &Page) -> ExtractResult<String> {
    let meta = page.find_element(META_SELECTOR)?;
    parse_shares(meta.text())
}

/// Last `|` segment's leading token, or empty when there is only one segment
pub fn parse_shares(meta_text: &str) -> ExtractResult<String> {
    let parts: Vec<&str> = meta_text.split('|').collect();
    if parts.len() <= 1 {
        return Ok(String::new());
    }
    let last = parts.last().copied().unwrap_or_default();
    first_token(last.trim(), META_SELECTOR)
}

pub fn extract_content(page: &Page) -> ExtractResult<String> {
    let paragraphs: Vec<String> = page
        .find_elements(PARAGRAPH_SELECTOR)?
        .iter()
        .map(|p| p.text().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    Ok(paragraphs.join("\n\n"))
}

/// Run every field lookup independently against a loaded article page
pub fn extract_fields(page: &Page) -> ScrapedFields {
    ScrapedFields {
        author: or_empty(extract_author(page)),
        reading_time: or_empty(extract_reading_time(page)),
        shares: or_empty(extract_shares(page)),
        comments: or_empty(extract_comments(page)),
        content: or_empty(extract_content(page)),
    }
}

/// Load an article and extract its fields once the main container is present.
///
/// Navigation and readiness failures are returned; field failures are not.
pub fn scrape_article<B: Browser + ?Sized>(
    browser: &mut B,
    url: &str,
    wait_timeout: Duration,
) -> ScrapeResult<ScrapedFields> {
    browser.navigate(url)?;
    browser.wait_for(READY_SELECTOR, wait_timeout)?;
    let page = browser.page()?;
    Ok(extract_fields(&page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fixture::FixtureBrowser;
    use crate::errors::ScrapeError;

    const ARTICLE: &str = r##"
        <html><body><div class="main-container">
          <div class="post-main-image__meta">
            5 min read | <a href="#comments">12 Comments</a> | 34 Shares
          </div>
          <p class="reading-time">Estimated reading time: 5 minutes</p>
          <div class="post-content">
            <p>  Opening paragraph.  </p>
            <p>   </p>
            <p>Closing <em>paragraph</em>.</p>
          </div>
          <aside class="single-post__main-sidebar"><h3> Jane Doe </h3></aside>
        </div></body></html>
    "##;

    const NO_READING_TIME: &str = r##"
        <html><body><div class="main-container">
          <div class="post-main-image__meta">
            3 min read | <a href="#comments">0 Comments</a> | 7 Shares
          </div>
          <div class="post-content"><p>Only paragraph.</p></div>
          <aside class="single-post__main-sidebar"><h3>A. Author</h3></aside>
        </div></body></html>
    "##;

    fn page(html: &str) -> Page {
        Page::parse("https://blogs.example.ac.uk/politics/2024/01/01/post/", html)
    }

    #[test]
    fn test_extract_all_fields() {
        let fields = extract_fields(&page(ARTICLE));
        assert_eq!(fields.author, "Jane Doe");
        assert_eq!(fields.reading_time, "5 minutes");
        assert_eq!(fields.comments, "12");
        assert_eq!(fields.shares, "34");
        assert_eq!(fields.content, "Opening paragraph.\n\nClosing paragraph.");
    }

    #[test]
    fn test_missing_reading_time_leaves_other_fields() {
        let fields = extract_fields(&page(NO_READING_TIME));
        assert_eq!(fields.reading_time, "");
        assert_eq!(fields.author, "A. Author");
        assert_eq!(fields.comments, "0");
        assert_eq!(fields.shares, "7");
        assert_eq!(fields.content, "Only paragraph.");
    }

    #[test]
    fn test_line_break_inside_paragraph_keeps_words_apart() {
        let html = r#"<html><body><div class="post-content">
            <p>First line<br>Second line</p>
            <p>Next paragraph</p>
        </div></body></html>"#;
        assert_eq!(
            extract_content(&page(html)).unwrap(),
            "First line\nSecond line\n\nNext paragraph"
        );
    }

    #[test]
    fn test_parse_shares() {
        assert_eq!(parse_shares("5 min read | 12 Comments | 34 Shares").unwrap(), "34");
        assert_eq!(parse_shares("5 min read").unwrap(), "");
        assert_eq!(parse_shares("").unwrap(), "");
        assert!(parse_shares("5 min read |   ").is_err());
    }

    #[test]
    fn test_empty_page_yields_empty_fields() {
        let fields = extract_fields(&page("<html><body></body></html>"));
        assert_eq!(fields, ScrapedFields::default());
    }

    #[test]
    fn test_individual_extractor_reports_missing_element() {
        let result = extract_author(&page("<html><body></body></html>"));
        assert_eq!(result, Err(ExtractError::Missing(AUTHOR_SELECTOR.to_string())));
    }

    #[test]
    fn test_scrape_article_waits_for_container() {
        let url = "https://blogs.example.ac.uk/a";
        let mut browser = FixtureBrowser::new().with_page(url, ARTICLE);

        let fields = scrape_article(&mut browser, url, Duration::from_secs(1)).unwrap();
        assert_eq!(fields.author, "Jane Doe");
        assert_eq!(browser.navigations, vec![url.to_string()]);
    }

    #[test]
    fn test_scrape_article_without_container_times_out() {
        let url = "https://blogs.example.ac.uk/b";
        let mut browser = FixtureBrowser::new().with_page(url, "<html><body><p>x</p></body></html>");

        let result = scrape_article(&mut browser, url, Duration::from_secs(1));
        assert!(matches!(result, Err(ScrapeError::Timeout { .. })));
    }
}
