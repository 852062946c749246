//! Search run orchestration.

use futures::{StreamExt, pin_mut};
use sift_error::{Result, SiftError};
use sift_types::KeywordSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::SearchConfig;
use crate::paginate::list_keys;
use crate::router::WorkRouter;
use crate::sink::MatchSink;
use crate::stats::{SearchStats, SearchSummary};
use crate::store::ObjectStore;
use crate::worker::MatchWorker;

/// Coordinates listing, matching and persisting for one bucket.
///
/// Listed keys are routed to a fixed pool of workers through bounded
/// channels. [`run`](Searcher::run) returns only after every worker has
/// finished. The first listing, fetch or write error stops dispatching new
/// keys and is returned once the pool has drained.
pub struct Searcher<S: ?Sized, K: ?Sized> {
    store: Arc<S>,
    sink: Arc<K>,
    keywords: Arc<KeywordSet>,
    config: SearchConfig,
    stats: Arc<SearchStats>,
}

impl<S, K> Searcher<S, K>
where
    S: ObjectStore + ?Sized + 'static,
    K: MatchSink + ?Sized + 'static,
{
    pub fn new(store: Arc<S>, sink: Arc<K>, keywords: KeywordSet, config: SearchConfig) -> Self {
        Self {
            store,
            sink,
            keywords: Arc::new(keywords),
            config,
            stats: Arc::new(SearchStats::new()),
        }
    }

    /// Live counters for the run.
    pub fn stats(&self) -> &Arc<SearchStats> {
        &self.stats
    }

    /// Run the search to completion.
    pub async fn run(&self) -> Result<SearchSummary> {
        self.config.validate().map_err(SiftError::Config)?;

        info!(
            store = %self.store.describe(),
            keywords = self.keywords.len(),
            workers = self.config.workers,
            page_size = self.config.page_size,
            "Starting search"
        );

        let (router, receivers) = WorkRouter::new(self.config.workers, self.config.channel_buffer);

        let handles: Vec<JoinHandle<Result<()>>> = receivers
            .into_iter()
            .enumerate()
            .map(|(worker_id, rx)| {
                let worker = MatchWorker::new(
                    Arc::clone(&self.store),
                    Arc::clone(&self.sink),
                    Arc::clone(&self.keywords),
                    Arc::clone(&self.stats),
                );
                tokio::spawn(worker_loop(worker_id, rx, worker))
            })
            .collect();

        let dispatch_result = self.dispatch(&router).await;

        // Closing the channels lets workers drain and exit
        drop(router);

        let mut worker_error = None;
        for (worker_id, joined) in futures::future::join_all(handles)
            .await
            .into_iter()
            .enumerate()
        {
            let failure = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(e) => SiftError::Other(anyhow::anyhow!("worker {worker_id} panicked: {e}")),
            };
            error!(worker = worker_id, error = %failure, "Worker failed");
            worker_error.get_or_insert(failure);
        }

        dispatch_result?;
        if let Some(e) = worker_error {
            return Err(e);
        }

        let summary = self.stats.summary();
        info!(
            pages = summary.pages_listed,
            listed = summary.objects_listed,
            matched = summary.objects_matched,
            warnings = summary.warnings.len(),
            "Search completed"
        );

        Ok(summary)
    }

    /// Feed listed keys to the pool until the listing ends or a worker stops.
    async fn dispatch(&self, router: &WorkRouter<String>) -> Result<()> {
        let stream = list_keys(self.store.as_ref(), self.config.page_size, &self.stats);
        pin_mut!(stream);

        while let Some(key) = stream.next().await {
            let key = key?;
            if let Err(key) = router.route(key).await {
                warn!(key = %key, "Worker pool stopped, no longer dispatching");
                break;
            }
        }

        Ok(())
    }
}

async fn worker_loop<S, K>(
    worker_id: usize,
    mut rx: mpsc::Receiver<String>,
    worker: MatchWorker<S, K>,
) -> Result<()>
where
    S: ObjectStore + ?Sized,
    K: MatchSink + ?Sized,
{
    debug!(worker = worker_id, "Worker started");

    while let Some(key) = rx.recv().await {
        worker.process(&key).await?;
    }

    debug!(worker = worker_id, "Worker stopped");
    Ok(())
}
