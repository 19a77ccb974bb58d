use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::browser::page::Page;
use crate::browser::traits::{Browser, ContextId};
use crate::errors::{ScrapeError, ScrapeResult};

/// In-memory driver serving canned HTML by URL
#[derive(Default)]
pub(crate) struct FixtureBrowser {
    pages: HashMap<String, String>,
    /// Loaded URL per open context
    tabs: BTreeMap<usize, Option<String>>,
    next_id: usize,
    current: Option<usize>,
    pub(crate) navigations: Vec<String>,
    pub(crate) closed_contexts: usize,
    pub(crate) quits: usize,
}

impl FixtureBrowser {
    pub(crate) fn new() -> Self {
        Self {
            tabs: BTreeMap::from([(0, None)]),
            next_id: 1,
            current: Some(0),
            ..Default::default()
        }
    }

    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    fn loaded_url(&self) -> ScrapeResult<&String> {
        let index = self.current.ok_or(ScrapeError::NoCurrentContext)?;
        self.tabs
            .get(&index)
            .ok_or(ScrapeError::NoSuchContext(index))?
            .as_ref()
            .ok_or(ScrapeError::NoPageLoaded)
    }
}

impl Browser for FixtureBrowser {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
        self.navigations.push(url.to_string());
        if !self.pages.contains_key(url) {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: 404,
            });
        }
        let index = self.current.ok_or(ScrapeError::NoCurrentContext)?;
        let tab = self
            .tabs
            .get_mut(&index)
            .ok_or(ScrapeError::NoSuchContext(index))?;
        *tab = Some(url.to_string());
        Ok(())
    }

    fn page(&self) -> ScrapeResult<Page> {
        let url = self.loaded_url()?;
        let html = self.pages.get(url).ok_or(ScrapeError::NoPageLoaded)?;
        Ok(Page::parse(url, html))
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> ScrapeResult<()> {
        if self.page()?.contains(selector)? {
            Ok(())
        } else {
            Err(ScrapeError::Timeout {
                selector: selector.to_string(),
                timeout,
            })
        }
    }

    fn open_context(&mut self) -> ScrapeResult<ContextId> {
        let id = self.next_id;
        self.next_id += 1;
        self.tabs.insert(id, None);
        Ok(ContextId(id))
    }

    fn switch_to(&mut self, context: ContextId) -> ScrapeResult<()> {
        if !self.tabs.contains_key(&context.0) {
            return Err(ScrapeError::NoSuchContext(context.0));
        }
        self.current = Some(context.0);
        Ok(())
    }

    fn close_context(&mut self, context: ContextId) -> ScrapeResult<()> {
        self.tabs
            .remove(&context.0)
            .ok_or(ScrapeError::NoSuchContext(context.0))?;
        if self.current == Some(context.0) {
            self.current = None;
        }
        self.closed_contexts += 1;
        Ok(())
    }

    fn current_context(&self) -> Option<ContextId> {
        self.current.map(ContextId)
    }

    fn contexts(&self) -> Vec<ContextId> {
        self.tabs.keys().copied().map(ContextId).collect()
    }

    fn quit(&mut self) -> ScrapeResult<()> {
        self.quits += 1;
        self.tabs.clear();
        self.current = None;
        Ok(())
    }
}
