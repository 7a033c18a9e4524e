use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One reported crawl event: either a page seen for the first time or a
/// failed fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub url: String,
    /// Remaining depth when the page was fetched.
    pub depth: usize,
    pub worker: usize,
    pub body: Option<String>,
    pub links_found: Vec<String>,
    pub elapsed: Duration,
    pub error: Option<String>,
}

impl CrawlResult {
    pub fn new(url: String, depth: usize) -> Self {
        Self {
            url,
            depth,
            worker: 0,
            body: None,
            links_found: Vec::new(),
            elapsed: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn with_error(url: String, depth: usize, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(url, depth)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
