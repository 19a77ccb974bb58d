use std::collections::BTreeMap;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;

use crate::browser::page::Page;
use crate::browser::traits::{Browser, ContextId};
use crate::errors::{ScrapeError, ScrapeResult};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

struct LoadedDocument {
    url: String,
    html: String,
}

#[derive(Default)]
struct Tab {
    document: Option<LoadedDocument>,
}

/// Driver that loads pages with plain HTTP requests. Scripts never run, so
/// readiness waits only succeed for markup the server sends.
pub struct HttpBrowser {
    client: Client,
    tabs: BTreeMap<usize, Tab>,
    next_id: usize,
    current: Option<usize>,
    poll_interval: Duration,
}

impl HttpBrowser {
    pub fn new(user_agent: Option<&str>) -> ScrapeResult<Self> {
        let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_string());
        }

        Ok(Self {
            client: builder.build()?,
            tabs: BTreeMap::from([(0, Tab::default())]),
            next_id: 1,
            current: Some(0),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn current_tab(&self) -> ScrapeResult<&Tab> {
        let index = self.current.ok_or(ScrapeError::NoCurrentContext)?;
        self.tabs.get(&index).ok_or(ScrapeError::NoSuchContext(index))
    }

    fn current_tab_mut(&mut self) -> ScrapeResult<&mut Tab> {
        let index = self.current.ok_or(ScrapeError::NoCurrentContext)?;
        self.tabs
            .get_mut(&index)
            .ok_or(ScrapeError::NoSuchContext(index))
    }

    fn fetch(&self, url: &str) -> ScrapeResult<LoadedDocument> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self.client.get(parsed).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let html = response.text()?;
        Ok(LoadedDocument {
            url: final_url,
            html,
        })
    }

    fn current_document(&self) -> ScrapeResult<&LoadedDocument> {
        self.current_tab()?
            .document
            .as_ref()
            .ok_or(ScrapeError::NoPageLoaded)
    }
}

impl Browser for HttpBrowser {
    fn name(&self) -> &'static str {
        "http"
    }

    fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
        let document = self.fetch(url)?;
        self.current_tab_mut()?.document = Some(document);
        Ok(())
    }

    fn page(&self) -> ScrapeResult<Page> {
        let document = self.current_document()?;
        Ok(Page::parse(&document.url, &document.html))
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> ScrapeResult<()> {
        let deadline = Instant::now() + timeout;

        loop {
            if self.page()?.contains(selector)? {
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(ScrapeError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }

            thread::sleep(self.poll_interval.min(deadline - now));

            // Reload in case the server was still producing the page
            let url = self.current_document()?.url.clone();
            match self.fetch(&url) {
                Ok(document) => self.current_tab_mut()?.document = Some(document),
                Err(e) => log::debug!("Reload of {} during wait failed: {}", url, e),
            }
        }
    }

    fn open_context(&mut self) -> ScrapeResult<ContextId> {
        let id = self.next_id;
        self.next_id += 1;
        self.tabs.insert(id, Tab::default());
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
        Ok(())
    }
}
