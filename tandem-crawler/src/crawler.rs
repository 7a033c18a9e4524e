use crate::error::{CrawlError, Result};
use crate::fetcher::Fetcher;
use crate::result::CrawlResult;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tandem_core::SafeCounter;
use tokio::sync::{Mutex, Notify};
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;
pub type ResultCallback = Arc<dyn Fn(CrawlResult) + Send + Sync>;

pub const DEFAULT_MAX_DEPTH: usize = 4;
pub const DEFAULT_WORKERS: usize = 4;

/// A URL waiting to be crawled with `depth` levels still allowed.
#[derive(Debug, Clone)]
struct CrawlJob {
    url: String,
    depth: usize,
}

/// Shared work queue plus a count of jobs that are queued or running.
///
/// The count reaching zero is the signal that the crawl is finished.
struct Frontier {
    queue: Mutex<VecDeque<CrawlJob>>,
    pending: AtomicUsize,
    changed: Notify,
}

impl Frontier {
    fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            pending: AtomicUsize::new(0),
            changed: Notify::new(),
        }
    }

    async fn push(&self, job: CrawlJob) {
        // Count first so a job is never queued without being pending
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.queue.lock().await.push_back(job);
        self.changed.notify_waiters();
    }

    async fn pop(&self) -> Option<CrawlJob> {
        self.queue.lock().await.pop_front()
    }

    fn finish(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.changed.notify_waiters();
        }
    }

    fn is_done(&self) -> bool {
        self.pending.load(Ordering::SeqCst) == 0
    }
}

/// Releases one pending job when dropped, so a job that panics still
/// counts as finished and the other workers can drain the queue.
struct PendingJob<'a>(&'a Frontier);

impl Drop for PendingJob<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Everything a worker task needs, shared by all workers of one crawl.
struct CrawlState<F> {
    fetcher: Arc<F>,
    counter: Arc<SafeCounter>,
    results: Arc<Mutex<Vec<CrawlResult>>>,
    frontier: Frontier,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

pub struct Crawler<F: Fetcher> {
    fetcher: Arc<F>,
    counter: Arc<SafeCounter>,
    results: Arc<Mutex<Vec<CrawlResult>>>,
    max_depth: usize,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            counter: Arc::new(SafeCounter::new()),
            results: Arc::new(Mutex::new(Vec::new())),
            max_depth: DEFAULT_MAX_DEPTH,
            progress_callback: None,
            result_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Use `counter` to record visited URLs instead of a fresh one.
    pub fn with_counter(mut self, counter: Arc<SafeCounter>) -> Self {
        self.counter = counter;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    /// Crawls from `start_url` with a pool of `workers` tasks and waits for
    /// every scheduled page to finish.
    ///
    /// Each page is fetched, then marked visited in one locked step. Only
    /// the first successful fetch of a URL is reported and expanded, so a
    /// page is reported at most once however many workers reach it.
    pub async fn crawl(&self, start_url: &str, workers: usize) -> Result<Vec<CrawlResult>> {
        let workers = workers.max(1);
        info!("Starting crawl of {} with {} workers", start_url, workers);

        // Results belong to the latest run only
        self.results.lock().await.clear();

        Url::parse(start_url)
            .map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", start_url, e)))?;

        if self.max_depth == 0 {
            debug!("Max depth is 0, nothing to fetch");
            return Ok(self.get_results().await);
        }

        let state = Arc::new(CrawlState {
            fetcher: self.fetcher.clone(),
            counter: self.counter.clone(),
            results: self.results.clone(),
            frontier: Frontier::new(),
            progress_callback: self.progress_callback.clone(),
            result_callback: self.result_callback.clone(),
        });

        state
            .frontier
            .push(CrawlJob {
                url: start_url.to_string(),
                depth: self.max_depth,
            })
            .await;

        let mut worker_handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let state = state.clone();
            worker_handles.push(tokio::spawn(async move {
                Self::run_worker(worker_id, state).await;
            }));
        }

        // Wait for all workers to complete
        for handle in worker_handles {
            handle.await?;
        }

        let results = self.get_results().await;
        info!("Crawl complete. {} results recorded", results.len());
        Ok(results)
    }

    async fn run_worker(worker_id: usize, state: Arc<CrawlState<F>>) {
        debug!("Worker {} started", worker_id);

        loop {
            // Created before looking at the queue so a push or the final
            // finish() between the check and the await still wakes us
            let changed = state.frontier.changed.notified();

            if let Some(job) = state.frontier.pop().await {
                let _pending = PendingJob(&state.frontier);
                Self::crawl_page(worker_id, &state, job).await;
                continue;
            }

            if state.frontier.is_done() {
                break;
            }

            changed.await;
        }

        debug!("Worker {} finished", worker_id);
    }

    async fn crawl_page(worker_id: usize, state: &CrawlState<F>, job: CrawlJob) {
        if job.depth == 0 {
            return;
        }

        if let Some(ref callback) = state.progress_callback {
            callback(worker_id, job.url.clone());
        }

        debug!("[Worker {}] Fetching {} (depth {})", worker_id, job.url, job.depth);
        let start = Instant::now();

        let page = match state.fetcher.fetch(&job.url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Crawl error for {}: {}", job.url, e);
                let mut result = CrawlResult::with_error(job.url, job.depth, e.to_string());
                result.worker = worker_id;
                result.elapsed = start.elapsed();
                Self::record(state, result).await;
                return;
            }
        };

        if !state.counter.visit(&job.url).await {
            debug!("[Worker {}] Already reported {}, skipping", worker_id, job.url);
            return;
        }

        info!("found: {} {:?}", job.url, page.body);

        if job.depth > 1 {
            for link in &page.links {
                state
                    .frontier
                    .push(CrawlJob {
                        url: link.clone(),
                        depth: job.depth - 1,
                    })
                    .await;
            }
        }

        let mut result = CrawlResult::new(job.url, job.depth);
        result.worker = worker_id;
        result.body = Some(page.body);
        result.links_found = page.links;
        result.elapsed = start.elapsed();
        Self::record(state, result).await;
    }

    async fn record(state: &CrawlState<F>, result: CrawlResult) {
        if let Some(ref callback) = state.result_callback {
            callback(result.clone());
        }
        state.results.lock().await.push(result);
    }

    pub async fn get_results(&self) -> Vec<CrawlResult> {
        self.results.lock().await.clone()
    }

    pub async fn get_visited_count(&self) -> usize {
        self.counter.len().await
    }
}

/// Crawls `url` to `max_depth` levels using `fetcher`, recording visited
/// pages in `counter`.
pub async fn crawl<F: Fetcher>(
    url: &str,
    max_depth: usize,
    fetcher: Arc<F>,
    counter: Arc<SafeCounter>,
) -> Result<Vec<CrawlResult>> {
    Crawler::new(fetcher)
        .with_counter(counter)
        .with_max_depth(max_depth)
        .crawl(url, DEFAULT_WORKERS)
        .await
}
