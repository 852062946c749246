//! Marker-based bucket pagination.

use async_stream::try_stream;
use futures::Stream;
use sift_error::Result;
use tracing::{debug, info, warn};

use crate::stats::SearchStats;
use crate::store::ObjectStore;

/// Stream every key of the store, one listing page at a time.
///
/// Pages of `page_size` keys are requested with the previous page's last key
/// as the start marker. Listing stops when a page is empty, shorter than
/// `page_size`, or reported as the end of the bucket. If a store hands back
/// the marker key itself (a marker that does not advance), listing stops
/// there instead of looping.
///
/// Keys are yielded as each page arrives, so a consumer dispatching them
/// runs interleaved with the listing. Directory markers (keys ending in `/`)
/// are skipped.
pub fn list_keys<'a, S>(
    store: &'a S,
    page_size: usize,
    stats: &'a SearchStats,
) -> impl Stream<Item = Result<String>> + 'a
where
    S: ObjectStore + ?Sized,
{
    try_stream! {
        let mut cursor = String::new();

        'pages: loop {
            let page_number = stats.record_page();
            info!(page = page_number, listed = stats.objects_listed(), "Listing page");

            let page = store.list_page(&cursor, page_size).await?;
            let full = page.keys.len() >= page_size;
            let truncated = page.truncated;
            let mut last_key = None;

            for key in page.keys {
                if !cursor.is_empty() && key == cursor {
                    warn!(marker = %cursor, "Listing did not advance past marker, stopping");
                    break 'pages;
                }

                stats.record_listed();

                if !key.ends_with('/') {
                    yield key.clone();
                }

                last_key = Some(key);
            }

            if !full || !truncated {
                debug!(pages = page_number + 1, "Listing complete");
                break;
            }

            match last_key {
                Some(key) => cursor = key,
                None => break,
            }
        }
    }
}
