use scraper::{ElementRef, Html, Selector};

use crate::crawlers::{CrawlerError, CrawlerResult};
use crate::domain::record::Record;

/// Read access to the parts of an article page the crawler cares about.
pub trait Page {
    /// Trimmed text of the first heading element, or an empty string.
    fn select_heading(&self) -> String;

    /// Trimmed text of every non-empty paragraph, in document order.
    fn select_paragraphs(&self) -> Vec<String>;

    /// Trimmed `href` values of every anchor on the page. An empty value
    /// refers to the page the link is resolved against.
    fn select_links(&self) -> Vec<String>;
}

/// Selectors used by [`HtmlPage`].
#[derive(Clone, Debug)]
pub struct PageSelectors {
    heading: Selector,
    paragraph: Selector,
    link: Selector,
}

impl PageSelectors {
    pub fn new(heading: &str, paragraph: &str) -> CrawlerResult<Self> {
        Ok(Self {
            heading: parse_selector(heading)?,
            paragraph: parse_selector(paragraph)?,
            link: parse_selector("a[href]")?,
        })
    }
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            heading: Selector::parse("h2").unwrap(),
            paragraph: Selector::parse("p").unwrap(),
            link: Selector::parse("a[href]").unwrap(),
        }
    }
}

fn parse_selector(selector: &str) -> CrawlerResult<Selector> {
    Selector::parse(selector).map_err(|e| CrawlerError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// [`Page`] over a document parsed with `scraper`.
pub struct HtmlPage<'s> {
    document: Html,
    selectors: &'s PageSelectors,
}

impl<'s> HtmlPage<'s> {
    pub fn parse(html: &str, selectors: &'s PageSelectors) -> Self {
        Self {
            document: Html::parse_document(html),
            selectors,
        }
    }
}

impl Page for HtmlPage<'_> {
    fn select_heading(&self) -> String {
        self.document
            .select(&self.selectors.heading)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    fn select_paragraphs(&self) -> Vec<String> {
        self.document
            .select(&self.selectors.paragraph)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }

    fn select_links(&self) -> Vec<String> {
        self.document
            .select(&self.selectors.link)
            .filter_map(|link| Some(link.value().attr("href")?.trim().to_string()))
            .collect()
    }
}

/// Builds the [`Record`] for an article page fetched from `url`.
pub fn extract_record(url: &str, page: &impl Page) -> Record {
    Record {
        url: url.to_string(),
        heading: page.select_heading(),
        body: page.select_paragraphs().join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
        <html><body>
          <nav><a href="/archive?page=2">Next</a></nav>
          <h2>  Growth Hacking 101 </h2>
          <h2>Related posts</h2>
          <p> First paragraph. </p>
          <p>   </p>
          <p>Second <b>bold</b> paragraph.</p>
          <a href="https://other.example/post">Elsewhere</a>
          <a href="">Empty</a>
        </body></html>
    "#;

    #[test]
    fn heading_is_first_match_trimmed() {
        let selectors = PageSelectors::default();
        let page = HtmlPage::parse(ARTICLE, &selectors);

        assert_eq!(page.select_heading(), "Growth Hacking 101");
    }

    #[test]
    fn paragraphs_skip_blank_entries() {
        let selectors = PageSelectors::default();
        let page = HtmlPage::parse(ARTICLE, &selectors);

        assert_eq!(
            page.select_paragraphs(),
            vec!["First paragraph.", "Second bold paragraph."]
        );
    }

    #[test]
    fn links_keep_raw_hrefs() {
        let selectors = PageSelectors::default();
        let page = HtmlPage::parse(ARTICLE, &selectors);

        assert_eq!(
            page.select_links(),
            vec!["/archive?page=2", "https://other.example/post", ""]
        );
    }

    #[test]
    fn record_joins_paragraphs_with_single_spaces() {
        let selectors = PageSelectors::default();
        let page = HtmlPage::parse(ARTICLE, &selectors);

        let record = extract_record("https://x/a", &page);

        assert_eq!(record.url, "https://x/a");
        assert_eq!(record.heading, "Growth Hacking 101");
        assert_eq!(record.body, "First paragraph. Second bold paragraph.");
    }

    #[test]
    fn page_without_heading_yields_empty_heading() {
        let selectors = PageSelectors::default();
        let page = HtmlPage::parse("<p>Only text</p>", &selectors);

        let record = extract_record("https://x/b", &page);

        assert_eq!(record.heading, "");
        assert_eq!(record.body, "Only text");
    }

    #[test]
    fn custom_selectors_are_validated() {
        assert!(PageSelectors::new("h1.title", "article p").is_ok());
        assert!(matches!(
            PageSelectors::new("h1[", "p"),
            Err(CrawlerError::Selector { .. })
        ));
    }
}
