use std::time::Duration;

use crate::browser::page::Page;
use crate::errors::ScrapeResult;

/// Handle to one browsing context (tab or window) of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(pub usize);

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "context-{}", self.0)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Browser {
    /// Identifies the backend in logs
    fn name(&self) -> &'static str;

    /// Load `url` into the current browsing context
    fn navigate(&mut self, url: &str) -> ScrapeResult<()>;

    /// Snapshot of the current document
    fn page(&self) -> ScrapeResult<Page>;

    /// Block until `selector` is present or `timeout` elapses
    fn wait_for(&mut self, selector: &str, timeout: Duration) -> ScrapeResult<()>;

    /// Open a blank browsing context without switching to it
    fn open_context(&mut self) -> ScrapeResult<ContextId>;

    fn switch_to(&mut self, context: ContextId) -> ScrapeResult<()>;

    /// Close `context`. When it was current, no context is current afterwards.
    fn close_context(&mut self, context: ContextId) -> ScrapeResult<()>;

    fn current_context(&self) -> Option<ContextId>;

    /// Open contexts in creation order
    fn contexts(&self) -> Vec<ContextId>;

    /// Tear the session down. Calling it twice is harmless.
    fn quit(&mut self) -> ScrapeResult<()>;
}

macro_rules! forward_browser {
    ($($wrapper:ty),+) => {$(
        impl<B: Browser + ?Sized> Browser for $wrapper {
            fn name(&self) -> &'static str {
                (**self).name()
            }

            fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
                (**self).navigate(url)
            }

            fn page(&self) -> ScrapeResult<Page> {
                (**self).page()
            }

            fn wait_for(&mut self, selector: &str, timeout: Duration) -> ScrapeResult<()> {
                (**self).wait_for(selector, timeout)
            }

            fn open_context(&mut self) -> ScrapeResult<ContextId> {
                (**self).open_context()
            }

            fn switch_to(&mut self, context: ContextId) -> ScrapeResult<()> {
                (**self).switch_to(context)
            }

            fn close_context(&mut self, context: ContextId) -> ScrapeResult<()> {
                (**self).close_context(context)
            }

            fn current_context(&self) -> Option<ContextId> {
                (**self).current_context()
            }

            fn contexts(&self) -> Vec<ContextId> {
                (**self).contexts()
            }

            fn quit(&mut self) -> ScrapeResult<()> {
                (**self).quit()
            }
        }
    )+};
}

forward_browser!(&mut B, Box<B>);
