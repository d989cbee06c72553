//! Helpers for integration tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use monk_indexer::crawlers::{CrawlerError, CrawlerResult, PageFetcher};
use monk_indexer::repository::JsonSnapshotRepository;
use tempfile::TempDir;

/// Snapshot file inside a temporary directory removed on drop.
pub struct TestSnapshot {
    _dir: TempDir,
    path: PathBuf,
}

impl TestSnapshot {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        TestSnapshot { _dir: dir, path }
    }

    pub fn repo(&self) -> JsonSnapshotRepository {
        JsonSnapshotRepository::new(&self.path)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// In-memory site that serves canned HTML and counts every request.
#[derive(Default)]
pub struct ScriptedSite {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Every URL requested, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl PageFetcher for ScriptedSite {
    async fn fetch(&self, url: &str) -> CrawlerResult<String> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| CrawlerError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

pub fn article(heading: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!("<html><body><h2>{heading}</h2>{body}</body></html>")
}

pub fn listing(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{href}\">link</a>"))
        .collect();
    format!("<html><body>{links}</body></html>")
}
