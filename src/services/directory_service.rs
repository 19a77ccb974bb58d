use std::time::Duration;

use crate::browser::{AuxContext, Browser, BrowserSession, Element};
use crate::config::Config;
use crate::domain::{BlogEntry, DirectoryReport, ResolutionTier};
use crate::errors::{ScrapeError, ScrapeResult};
use crate::storage::traits::BlogStore;

pub const CARD_SELECTOR: &str = "div.cta-card";
pub const PRIMARY_LINK_SELECTOR: &str = "a";
pub const VIEW_ALL_SELECTOR: &str = "a.button.button--solid";
pub const NAME_SELECTOR: &str = "strong";
pub const NAME_SEPARATOR: char = '–';
pub const LISTING_SUFFIX: &str = "/recent-posts";

fn strip_trailing_slash(link: String) -> String {
    link.trim_end_matches('/').to_string()
}

/// Display name: emphasized text up to the separator, else the whole card
pub fn card_name(card: &Element) -> String {
    match card.find_element(NAME_SELECTOR) {
        Ok(strong) => strong
            .text()
            .split(NAME_SEPARATOR)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        // Rendered card text may span lines; names stay on one
        Err(_) => card.text().split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// Link of the card's "view all" button, if it has one
pub fn direct_link(card: &Element) -> Option<String> {
    card.find_element(VIEW_ALL_SELECTOR)
        .ok()
        .and_then(|button| button.link("href"))
        .map(strip_trailing_slash)
}

pub fn synthesized_link(base_link: &str) -> String {
    format!("{}{}", base_link, LISTING_SUFFIX)
}

pub struct DirectoryService<S: BlogStore> {
    store: S,
    index_url: String,
    wait_timeout: Duration,
}

impl<S: BlogStore> DirectoryService<S> {
    pub fn new(store: S, index_url: String, wait_timeout: Duration) -> Self {
        Self {
            store,
            index_url,
            wait_timeout,
        }
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(store, config.index_url.clone(), config.wait_timeout)
    }

    /// Open the blog's own page in a throwaway context and read its "view all" link
    fn lookup_in_aux_context<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        base_link: &str,
    ) -> ScrapeResult<String> {
        let mut aux = AuxContext::open(browser)?;
        let browser = aux.browser();

        browser.navigate(base_link)?;
        browser.wait_for(VIEW_ALL_SELECTOR, self.wait_timeout)?;
        browser
            .page()?
            .find_element(VIEW_ALL_SELECTOR)?
            .link("href")
            .map(strip_trailing_slash)
            .ok_or_else(|| ScrapeError::ElementNotFound(format!("{}[href]", VIEW_ALL_SELECTOR)))
    }

    /// Resolve one card through the fallback chain. `None` when the card has
    /// no primary link to start from.
    pub fn resolve_card<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        card: &Element,
    ) -> Option<(BlogEntry, ResolutionTier)> {
        let Some(base_link) = card
            .find_element(PRIMARY_LINK_SELECTOR)
            .ok()
            .and_then(|anchor| anchor.link("href"))
            .map(strip_trailing_slash)
        else {
            log::warn!("Skipping card without a link: {}", card.text());
            return None;
        };

        let (url, tier) = match direct_link(card) {
            Some(url) => (url, ResolutionTier::DirectLink),
            None => match self.lookup_in_aux_context(browser, &base_link) {
                Ok(url) => (url, ResolutionTier::AuxiliaryContext),
                Err(e) => {
                    log::debug!("No 'view all' link for {}: {}", base_link, e);
                    (synthesized_link(&base_link), ResolutionTier::Synthesized)
                }
            },
        };

        log::debug!("Resolved {} via {}", url, tier);
        Some((BlogEntry::new(card_name(card), url), tier))
    }

    pub fn scrape<B: Browser + ?Sized>(&self, browser: &mut B) -> ScrapeResult<DirectoryReport> {
        browser.navigate(&self.index_url)?;
        let cards = browser.page()?.find_elements(CARD_SELECTOR)?;
        log::info!("Found {} blog cards on {}", cards.len(), self.index_url);

        let mut report = DirectoryReport::default();
        for card in &cards {
            match self.resolve_card(&mut *browser, card) {
                Some((entry, tier)) => report.record(entry, tier),
                None => report.skipped += 1,
            }
        }

        Ok(report)
    }

    /// Scrape the directory, write the table, then release the session
    pub fn run<B: Browser>(&self, mut session: BrowserSession<B>) -> ScrapeResult<DirectoryReport> {
        let report = self.scrape(&mut *session)?;
        self.store.save(&report.entries)?;
        session.close()?;

        log::info!(
            "Scraped {} blogs ({} direct, {} from blog page, {} synthesized, {} skipped)",
            report.entries.len(),
            report.direct,
            report.auxiliary,
            report.synthesized,
            report.skipped
        );
        Ok(report)
    }
}
