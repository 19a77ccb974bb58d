use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::errors::{ScrapeError, ScrapeResult};

fn parse_selector(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector(selector.to_string()))
}

/// Elements that start on a line of their own when rendered
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Text nodes in document order. Source whitespace becomes a space, while
/// `<br>` and block boundaries become line breaks.
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) => {
                let Some(nested) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_ELEMENTS.contains(&el.name());
                if block {
                    out.push('\n');
                }
                collect_text(nested, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Rendered-text approximation: spaces collapsed within a line, blank lines dropped.
fn normalized_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    raw.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Snapshot of the document loaded in a browsing context
pub struct Page {
    url: Option<Url>,
    document: Html,
}

impl Page {
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: Url::parse(url).ok(),
            document: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// First element matching `selector`
    pub fn find_element(&self, selector: &str) -> ScrapeResult<Element> {
        let parsed = parse_selector(selector)?;
        self.document
            .select(&parsed)
            .next()
            .map(|el| Element::capture(el, self.url.as_ref()))
            .ok_or_else(|| ScrapeError::ElementNotFound(selector.to_string()))
    }

    /// Every element matching `selector`, in document order
    pub fn find_elements(&self, selector: &str) -> ScrapeResult<Vec<Element>> {
        let parsed = parse_selector(selector)?;
        Ok(self
            .document
            .select(&parsed)
            .map(|el| Element::capture(el, self.url.as_ref()))
            .collect())
    }

    pub fn contains(&self, selector: &str) -> ScrapeResult<bool> {
        let parsed = parse_selector(selector)?;
        Ok(self.document.select(&parsed).next().is_some())
    }
}

/// Owned copy of a matched element, detached from the page it came from
#[derive(Debug, Clone)]
pub struct Element {
    base: Option<Url>,
    html: String,
    text: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    fn capture(element: ElementRef<'_>, base: Option<&Url>) -> Self {
        Self {
            base: base.cloned(),
            html: element.html(),
            text: normalized_text(element),
            attrs: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value resolved against the page URL, as a driver reports `href`
    pub fn link(&self, name: &str) -> Option<String> {
        let raw = self.attr(name)?.trim();
        if raw.is_empty() {
            return None;
        }
        match &self.base {
            Some(base) => base.join(raw).ok().map(String::from),
            None => Url::parse(raw).ok().map(String::from),
        }
    }

    /// First descendant matching `selector`
    pub fn find_element(&self, selector: &str) -> ScrapeResult<Element> {
        self.find_elements(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::ElementNotFound(selector.to_string()))
    }

    /// Every descendant matching `selector`; the element itself never matches
    pub fn find_elements(&self, selector: &str) -> ScrapeResult<Vec<Element>> {
        let parsed = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.html);
        let Some(root) = fragment.root_element().child_elements().next() else {
            return Ok(Vec::new());
        };
        Ok(root
            .select(&parsed)
            .map(|el| Element::capture(el, self.base.as_ref()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <html><body>
          <div class="card">
            <a href="/blogs/politics/">Politics</a>
            <strong>  Politics   and Policy – LSE </strong>
            <div class="card"><span>inner</span></div>
          </div>
          <p>  first
             paragraph </p>
        </body></html>
    "#;

    #[test]
    fn test_find_element_normalizes_text() {
        let page = Page::parse("https://blogs.example.ac.uk/index/", HTML);
        let strong = page.find_element("strong").unwrap();
        assert_eq!(strong.text(), "Politics and Policy – LSE");

        let p = page.find_element("p").unwrap();
        assert_eq!(p.text(), "first paragraph");
    }

    #[test]
    fn test_line_breaks_separate_words() {
        let page = Page::parse(
            "https://blogs.example.ac.uk/",
            "<div id=\"box\"><p>First line<br>Second   line</p><div>Block</div>tail <b>bold</b></div>",
        );
        let p = page.find_element("p").unwrap();
        assert_eq!(p.text(), "First line\nSecond line");

        let outer = page.find_element("#box").unwrap();
        assert_eq!(outer.text(), "First line\nSecond line\nBlock\ntail bold");
    }

    #[test]
    fn test_missing_element_is_error() {
        let page = Page::parse("https://blogs.example.ac.uk/", HTML);
        assert!(matches!(
            page.find_element("table"),
            Err(ScrapeError::ElementNotFound(_))
        ));
        assert!(!page.contains("table").unwrap());
        assert!(page.find_elements("table").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let page = Page::parse("https://blogs.example.ac.uk/", HTML);
        assert!(matches!(
            page.find_element("div[[["),
            Err(ScrapeError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_link_resolves_against_page_url() {
        let page = Page::parse("https://blogs.example.ac.uk/index/", HTML);
        let link = page.find_element("a").unwrap();
        assert_eq!(link.attr("href"), Some("/blogs/politics/"));
        assert_eq!(
            link.link("href").as_deref(),
            Some("https://blogs.example.ac.uk/blogs/politics/")
        );
        assert_eq!(link.link("data-missing"), None);
    }

    #[test]
    fn test_scoped_lookup_excludes_self() {
        let page = Page::parse("https://blogs.example.ac.uk/", HTML);
        let cards = page.find_elements("div.card").unwrap();
        assert_eq!(cards.len(), 2);

        let outer = &cards[0];
        let nested = outer.find_elements("div.card").unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].text(), "inner");

        let anchor = outer.find_element("a").unwrap();
        assert_eq!(
            anchor.link("href").as_deref(),
            Some("https://blogs.example.ac.uk/blogs/politics/")
        );
    }
}
