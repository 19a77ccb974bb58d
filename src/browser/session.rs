use std::ops::{Deref, DerefMut};

use crate::browser::traits::{Browser, ContextId};
use crate::errors::ScrapeResult;

/// Owns a driver for the length of a run and tears it down on every exit path.
///
/// `close` reports a teardown failure to the caller; any other exit (early
/// return, `?`, panic unwinding) quits the driver from `Drop` and only logs.
pub struct BrowserSession<B: Browser> {
    browser: B,
    closed: bool,
}

impl<B: Browser> BrowserSession<B> {
    pub fn new(browser: B) -> Self {
        log::debug!("Browser session started ({})", browser.name());
        Self {
            browser,
            closed: false,
        }
    }

    pub fn close(mut self) -> ScrapeResult<()> {
        self.closed = true;
        log::debug!("Closing browser session ({})", self.browser.name());
        self.browser.quit()
    }
}

impl<B: Browser> Deref for BrowserSession<B> {
    type Target = B;

    fn deref(&self) -> &B {
        &self.browser
    }
}

impl<B: Browser> DerefMut for BrowserSession<B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.browser
    }
}

impl<B: Browser> Drop for BrowserSession<B> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.browser.quit() {
            log::warn!("Browser teardown failed: {}", e);
        }
    }
}

/// A secondary browsing context that is current while the guard lives.
///
/// On drop the context is closed and the previously current context is
/// selected again, whatever happened in between.
pub struct AuxContext<'a, B: Browser + ?Sized> {
    browser: &'a mut B,
    origin: Option<ContextId>,
    context: ContextId,
}

impl<'a, B: Browser + ?Sized> AuxContext<'a, B> {
    pub fn open(browser: &'a mut B) -> ScrapeResult<Self> {
        let origin = browser.current_context();
        let context = browser.open_context()?;
        let guard = Self {
            browser,
            origin,
            context,
        };
        if let Err(e) = guard.browser.switch_to(context) {
            log::warn!("Could not select new {}: {}", context, e);
            return Err(e);
        }
        Ok(guard)
    }

    pub fn browser(&mut self) -> &mut B {
        self.browser
    }
}

impl<B: Browser + ?Sized> Drop for AuxContext<'_, B> {
    fn drop(&mut self) {
        if let Err(e) = self.browser.close_context(self.context) {
            log::warn!("Closing auxiliary browsing context failed: {}", e);
        }
        if let Some(origin) = self.origin {
            if let Err(e) = self.browser.switch_to(origin) {
                log::warn!("Returning to {} failed: {}", origin, e);
            }
        }
    }
}
