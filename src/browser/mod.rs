pub mod traits;
pub mod page;
pub mod session;
pub mod http;
#[cfg(feature = "chrome")]
pub mod chrome;
#[cfg(test)]
pub(crate) mod fixture;

pub use traits::{Browser, ContextId};
pub use page::{Element, Page};
pub use session::{AuxContext, BrowserSession};
pub use http::HttpBrowser;
#[cfg(feature = "chrome")]
pub use chrome::ChromeBrowser;

use crate::config::{BrowserKind, Config};
use crate::errors::ScrapeResult;

/// Start the driver backend selected in `config`
pub fn launch(config: &Config) -> ScrapeResult<Box<dyn Browser>> {
    log::debug!("Launching {} browser", config.browser);
    match config.browser {
        BrowserKind::Http => Ok(Box::new(HttpBrowser::new(config.user_agent.as_deref())?)),
        #[cfg(feature = "chrome")]
        BrowserKind::Chrome => Ok(Box::new(ChromeBrowser::launch(config.headless)?)),
        #[cfg(not(feature = "chrome"))]
        BrowserKind::Chrome => Err(crate::errors::ScrapeError::UnsupportedBrowser(
            "chrome (build with the `chrome` feature)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ScrapeError;

    #[test]
    fn test_launch_http_backend() {
        let browser = launch(&Config::default()).unwrap();
        assert_eq!(browser.name(), "http");
    }

    #[cfg(not(feature = "chrome"))]
    #[test]
    fn test_chrome_requires_feature() {
        let config = Config {
            browser: BrowserKind::Chrome,
            ..Config::default()
        };
        assert!(matches!(
            launch(&config),
            Err(ScrapeError::UnsupportedBrowser(_))
        ));
    }
}
