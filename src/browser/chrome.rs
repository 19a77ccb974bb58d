use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser as ChromeProcess, LaunchOptions, Tab};

use crate::browser::page::Page;
use crate::browser::traits::{Browser, ContextId};
use crate::errors::{ScrapeError, ScrapeResult};

fn browser_error(err: impl std::fmt::Display) -> ScrapeError {
    ScrapeError::Browser(err.to_string())
}

/// Driver backed by a headless Chrome process
pub struct ChromeBrowser {
    process: Option<ChromeProcess>,
    tabs: BTreeMap<usize, Arc<Tab>>,
    next_id: usize,
    current: Option<usize>,
}

impl ChromeBrowser {
    pub fn launch(headless: bool) -> ScrapeResult<Self> {
        let options = LaunchOptions::default_builder()
            .headless(headless)
            .args(vec![OsStr::new("--disable-gpu")])
            .build()
            .map_err(browser_error)?;

        let process = ChromeProcess::new(options).map_err(browser_error)?;
        let first_tab = process.wait_for_initial_tab().map_err(browser_error)?;

        Ok(Self {
            process: Some(process),
            tabs: BTreeMap::from([(0, first_tab)]),
            next_id: 1,
            current: Some(0),
        })
    }

    fn current_tab(&self) -> ScrapeResult<&Arc<Tab>> {
        let index = self.current.ok_or(ScrapeError::NoCurrentContext)?;
        self.tabs.get(&index).ok_or(ScrapeError::NoSuchContext(index))
    }
}

impl Browser for ChromeBrowser {
    fn name(&self) -> &'static str {
        "chrome"
    }

    fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
        url::Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.current_tab()?
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(browser_error)?;
        Ok(())
    }

    fn page(&self) -> ScrapeResult<Page> {
        let tab = self.current_tab()?;
        let html = tab.get_content().map_err(browser_error)?;
        Ok(Page::parse(&tab.get_url(), &html))
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> ScrapeResult<()> {
        self.current_tab()?
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map(|_| ())
            .map_err(|e| {
                log::debug!("Wait for '{}' failed: {}", selector, e);
                ScrapeError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                }
            })
    }

    fn open_context(&mut self) -> ScrapeResult<ContextId> {
        let process = self
            .process
            .as_ref()
            .ok_or_else(|| ScrapeError::Browser("session already closed".to_string()))?;
        let tab = process.new_tab().map_err(browser_error)?;
        let id = self.next_id;
        self.next_id += 1;
        self.tabs.insert(id, tab);
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
        let tab = self
            .tabs
            .remove(&context.0)
            .ok_or(ScrapeError::NoSuchContext(context.0))?;
        if self.current == Some(context.0) {
            self.current = None;
        }
        tab.close(true).map_err(browser_error)?;
        Ok(())
    }

    fn current_context(&self) -> Option<ContextId> {
        self.current.map(ContextId)
    }

    fn contexts(&self) -> Vec<ContextId> {
        self.tabs.keys().copied().map(ContextId).collect()
    }

    fn quit(&mut self) -> ScrapeResult<()> {
        self.tabs.clear();
        self.current = None;
        // Dropping the process handle kills Chrome
        self.process.take();
        Ok(())
    }
}
