mod common;

use std::collections::HashSet;
use std::time::Duration;

use monk_indexer::crawlers::archive::ArchiveCrawler;
use monk_indexer::domain::record::Record;
use monk_indexer::processing::crawler::process_crawl;
use monk_indexer::repository::{
    RepositoryError, RepositoryResult, SnapshotReader, SnapshotWriter,
};

use common::{ScriptedSite, TestSnapshot, article, listing};

const BASE: &str = "https://blog.example.com/";
const ARCHIVE_1: &str = "https://blog.example.com/archive?page=1";
const ARCHIVE_2: &str = "https://blog.example.com/archive?page=2";
const ALPHA: &str = "https://blog.example.com/p/alpha";
const BETA: &str = "https://blog.example.com/p/beta";
const GAMMA: &str = "https://blog.example.com/p/gamma";
const BROKEN: &str = "https://blog.example.com/p/broken";

fn site() -> ScriptedSite {
    ScriptedSite::new()
        .page(
            ARCHIVE_1,
            &listing(&[
                "/p/alpha",
                "/p/beta",
                "https://blog.example.com/p/alpha#comments",
                "https://twitter.com/monk",
                "/archive?page=2",
                "/p/broken",
            ]),
        )
        .page(ARCHIVE_2, &listing(&["/p/beta", "p/gamma", "/p/alpha"]))
        .page(ALPHA, &article("Growth Hacking 101", &["Find a loop.", "Measure it."]))
        .page(BETA, &article("Cold Email Playbook", &["Short subject lines."]))
        .page(GAMMA, &article("Pricing Pages", &["Anchor high."]))
}

struct FailingWriter;

impl SnapshotWriter for FailingWriter {
    fn save(&self, _records: &[Record]) -> RepositoryResult<()> {
        Err(RepositoryError::Io(std::io::Error::other("disk full")))
    }
}

#[tokio::test]
async fn crawl_collects_each_article_once_in_discovery_order() {
    let crawler = ArchiveCrawler::new(site(), BASE, "example.com").expect("valid crawler");
    let snapshot = TestSnapshot::new("monk_data.json");

    let records = process_crawl(&crawler, 1, 2, &snapshot.repo())
        .await
        .expect("crawl succeeds");

    let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec![ALPHA, BETA, GAMMA]);
    assert_eq!(records[0].heading, "Growth Hacking 101");
    assert_eq!(records[0].body, "Find a loop. Measure it.");

    let unique: HashSet<&str> = urls.iter().copied().collect();
    assert_eq!(unique.len(), records.len());
}

#[tokio::test]
async fn crawl_never_fetches_a_url_twice() {
    let crawler = ArchiveCrawler::new(site(), BASE, "example.com").expect("valid crawler");
    let snapshot = TestSnapshot::new("monk_data.json");

    process_crawl(&crawler, 1, 2, &snapshot.repo())
        .await
        .expect("crawl succeeds");

    let site = crawler.fetcher();
    for url in [ARCHIVE_1, ARCHIVE_2, ALPHA, BETA, GAMMA, BROKEN] {
        assert_eq!(site.request_count(url), 1, "{url}");
    }
    assert_eq!(site.requests().len(), 6);
    assert!(site.requests().iter().all(|url| url.starts_with(BASE)));
}

#[tokio::test]
async fn failed_page_is_skipped_without_record() {
    let crawler = ArchiveCrawler::new(site(), BASE, "example.com").expect("valid crawler");

    let records = crawler.run(1, 1).await;

    // Page 2 is outside the range, so its link is crawled like any article.
    let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec![ALPHA, BETA, ARCHIVE_2]);
    assert_eq!(crawler.fetcher().request_count(BROKEN), 1);
}

#[tokio::test]
async fn crawl_with_every_fetch_failing_writes_empty_snapshot() {
    let crawler =
        ArchiveCrawler::new(ScriptedSite::new(), BASE, "example.com").expect("valid crawler");
    let snapshot = TestSnapshot::new("monk_data.json");

    let records = process_crawl(&crawler, 1, 3, &snapshot.repo())
        .await
        .expect("crawl succeeds");

    assert!(records.is_empty());
    assert_eq!(crawler.fetcher().requests().len(), 3);
    assert_eq!(
        std::fs::read_to_string(snapshot.path()).expect("snapshot written"),
        "[]"
    );
}

#[tokio::test]
async fn snapshot_write_failure_is_reported() {
    let crawler = ArchiveCrawler::new(site(), BASE, "example.com").expect("valid crawler");

    let result = process_crawl(&crawler, 1, 1, &FailingWriter).await;

    assert!(matches!(result, Err(RepositoryError::Io(_))));
}

#[tokio::test]
async fn crawl_overwrites_previous_snapshot() {
    let snapshot = TestSnapshot::new("monk_data.json");
    snapshot
        .repo()
        .save(&[Record::new("https://old/1", "Old", "stale")])
        .expect("seed snapshot");
    let crawler = ArchiveCrawler::new(site(), BASE, "example.com").expect("valid crawler");

    process_crawl(&crawler, 2, 2, &snapshot.repo())
        .await
        .expect("crawl succeeds");

    let loaded = snapshot.repo().load().expect("snapshot loads");
    let urls: Vec<&str> = loaded.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec![BETA, GAMMA, ALPHA]);
}

#[tokio::test(start_paused = true)]
async fn request_delay_separates_every_fetch_after_the_first() {
    let crawler = ArchiveCrawler::new(site(), BASE, "example.com")
        .expect("valid crawler")
        .with_request_delay(Duration::from_millis(100));

    let started = tokio::time::Instant::now();
    crawler.run(1, 2).await;
    let elapsed = started.elapsed();

    let requests = crawler.fetcher().requests().len();
    assert_eq!(requests, 6);
    assert_eq!(elapsed, Duration::from_millis(100) * (requests as u32 - 1));
}

#[tokio::test(start_paused = true)]
async fn single_request_is_not_delayed() {
    let crawler = ArchiveCrawler::new(ScriptedSite::new(), BASE, "example.com")
        .expect("valid crawler")
        .with_request_delay(Duration::from_secs(5));

    let started = tokio::time::Instant::now();
    crawler.run(1, 1).await;

    assert_eq!(crawler.fetcher().requests().len(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}
