use std::time::Duration;

use url::Url;

use crate::crawlers::page::{HtmlPage, Page, PageSelectors, extract_record};
use crate::crawlers::visited::VisitedSet;
use crate::crawlers::{CrawlerError, CrawlerResult, PageFetcher};
use crate::domain::record::Record;
use crate::models::config::CrawlerConfig;

/// Counters collected during one crawl run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    pub requests: usize,
    pub archive_pages_fetched: usize,
    pub archive_pages_failed: usize,
    pub links_discovered: usize,
    pub links_off_domain: usize,
    pub duplicates_skipped: usize,
    pub pages_fetched: usize,
    pub pages_failed: usize,
}

/// Crawler for a paginated blog archive.
///
/// Every archive page in the requested range is fetched once, each in-domain
/// link found on it is fetched at most once, and every successfully fetched
/// article becomes a [`Record`]. Requests are issued one at a time.
pub struct ArchiveCrawler<F> {
    fetcher: F,
    base_url: Url,
    archive_url: Url,
    page_param: String,
    domain_suffix: String,
    selectors: PageSelectors,
    request_delay: Duration,
}

impl<F: PageFetcher> ArchiveCrawler<F> {
    /// Creates a crawler for `base_url` whose archive lives at `archive?page=N`
    /// and which only follows links whose host matches `domain_suffix`.
    pub fn new(fetcher: F, base_url: &str, domain_suffix: &str) -> CrawlerResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CrawlerError::Build(e.to_string()))?;
        let archive_url = base_url
            .join("archive")
            .map_err(|e| CrawlerError::Build(e.to_string()))?;
        Ok(Self {
            fetcher,
            base_url,
            archive_url,
            page_param: "page".to_string(),
            domain_suffix: domain_suffix.to_lowercase(),
            selectors: PageSelectors::default(),
            request_delay: Duration::ZERO,
        })
    }

    pub fn from_config(fetcher: F, config: &CrawlerConfig) -> CrawlerResult<Self> {
        let selectors = PageSelectors::new(&config.heading_selector, &config.paragraph_selector)?;
        Ok(Self::new(fetcher, &config.base_url, &config.domain_suffix)?
            .with_archive_path(&config.archive_path, &config.page_param)?
            .with_selectors(selectors)
            .with_request_delay(Duration::from_millis(config.request_delay_ms)))
    }

    /// Overrides the archive location, resolved against the base URL.
    pub fn with_archive_path(mut self, path: &str, page_param: &str) -> CrawlerResult<Self> {
        self.archive_url = self
            .base_url
            .join(path)
            .map_err(|e| CrawlerError::Build(e.to_string()))?;
        self.page_param = page_param.to_string();
        Ok(self)
    }

    pub fn with_selectors(mut self, selectors: PageSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Sleeps for `delay` before every request after the first one.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// URL of archive page number `page`.
    pub fn archive_page_url(&self, page: u32) -> String {
        let mut url = self.archive_url.clone();
        url.query_pairs_mut()
            .append_pair(&self.page_param, &page.to_string());
        url.to_string()
    }

    /// Resolves `href` against the base URL and returns it when it stays
    /// inside the configured domain. Fragments are dropped.
    pub fn resolve_link(&self, href: &str) -> Option<Url> {
        let mut url = self.base_url.join(href).ok()?;
        if !matches!(url.scheme(), "http" | "https") || !self.is_in_domain(&url) {
            return None;
        }
        url.set_fragment(None);
        Some(url)
    }

    /// Whether the host of `url` equals or ends with the domain suffix.
    pub fn is_in_domain(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_lowercase();
        host == self.domain_suffix || host.ends_with(self.domain_suffix.as_str())
    }

    /// Crawls archive pages `start_page..=end_page` and returns the records in
    /// discovery order.
    ///
    /// Fetch failures are logged and skipped; a URL that failed once is not
    /// retried within the run.
    pub async fn run(&self, start_page: u32, end_page: u32) -> Vec<Record> {
        log::info!(
            "Crawling archive pages {start_page}..={end_page} of {}",
            self.base_url
        );

        let mut stats = CrawlStats::default();
        let mut visited = VisitedSet::new();
        let mut records = Vec::new();

        // Archive pages are fetched by the loop below, never as articles.
        let archive_urls: Vec<String> = (start_page..=end_page)
            .map(|page| self.archive_page_url(page))
            .collect();
        for url in &archive_urls {
            visited.mark(url);
        }

        for archive_url in &archive_urls {
            let links = match self.fetch_paced(archive_url, &mut stats).await {
                Ok(html) => {
                    stats.archive_pages_fetched += 1;
                    HtmlPage::parse(&html, &self.selectors).select_links()
                }
                Err(e) => {
                    stats.archive_pages_failed += 1;
                    log::warn!("Failed to retrieve archive page {archive_url}: {e}");
                    continue;
                }
            };

            for href in links {
                stats.links_discovered += 1;
                let Some(url) = self.resolve_link(&href) else {
                    stats.links_off_domain += 1;
                    continue;
                };
                let url = url.to_string();
                if !visited.mark(&url) {
                    stats.duplicates_skipped += 1;
                    continue;
                }

                match self.fetch_paced(&url, &mut stats).await {
                    Ok(html) => {
                        let page = HtmlPage::parse(&html, &self.selectors);
                        records.push(extract_record(&url, &page));
                        stats.pages_fetched += 1;
                    }
                    Err(e) => {
                        stats.pages_failed += 1;
                        log::warn!("Failed to retrieve linked page {url}: {e}");
                    }
                }
            }
        }

        log::info!(
            "Finished crawling {}: archive_pages_fetched={}, archive_pages_failed={}, links_discovered={}, links_off_domain={}, duplicates_skipped={}, pages_fetched={}, pages_failed={}, records={}",
            self.base_url,
            stats.archive_pages_fetched,
            stats.archive_pages_failed,
            stats.links_discovered,
            stats.links_off_domain,
            stats.duplicates_skipped,
            stats.pages_fetched,
            stats.pages_failed,
            records.len()
        );

        records
    }

    async fn fetch_paced(&self, url: &str, stats: &mut CrawlStats) -> CrawlerResult<String> {
        if stats.requests > 0 && !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
        stats.requests += 1;
        log::debug!("Fetching {url}");
        self.fetcher.fetch(url).await
    }
}
