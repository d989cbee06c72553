use crate::crawlers::PageFetcher;
use crate::crawlers::archive::ArchiveCrawler;
use crate::domain::record::Record;
use crate::repository::{RepositoryResult, SnapshotWriter};

/// Crawls archive pages `start_page..=end_page` and replaces the snapshot with
/// whatever was collected.
///
/// Individual page failures never abort the crawl; only a failure to write the
/// snapshot is returned to the caller.
pub async fn process_crawl<F, W>(
    crawler: &ArchiveCrawler<F>,
    start_page: u32,
    end_page: u32,
    writer: &W,
) -> RepositoryResult<Vec<Record>>
where
    F: PageFetcher,
    W: SnapshotWriter,
{
    log::info!("Received crawl request for archive pages {start_page}..={end_page}");

    let records = crawler.run(start_page, end_page).await;

    if let Err(e) = writer.save(&records) {
        log::error!("Error saving snapshot: {e}");
        return Err(e);
    }

    log::info!("Finished processing crawl: {} records", records.len());
    Ok(records)
}
