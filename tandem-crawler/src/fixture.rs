use crate::error::{CrawlError, Result};
use crate::fetcher::{Fetcher, Page};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::trace;

/// Root of the bundled sample graph.
pub const SAMPLE_ROOT: &str = "https://example.org/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixturePage {
    pub body: String,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Serves canned pages from memory. Unknown URLs fail with
/// [`CrawlError::NotFound`].
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, FixturePage>,
    latency: Option<Duration>,
    fetches: AtomicUsize,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five-page sample graph. `https://example.org/cmd/` is linked
    /// but missing, so crawling it reports a failure.
    pub fn sample() -> Self {
        Self::new()
            .with_page(
                "https://example.org/",
                "Example Home",
                &["https://example.org/docs/", "https://example.org/cmd/"],
            )
            .with_page(
                "https://example.org/docs/",
                "Documentation",
                &[
                    "https://example.org/",
                    "https://example.org/cmd/",
                    "https://example.org/docs/fmt/",
                    "https://example.org/docs/os/",
                ],
            )
            .with_page(
                "https://example.org/docs/fmt/",
                "Formatting Guide",
                &["https://example.org/", "https://example.org/docs/"],
            )
            .with_page(
                "https://example.org/docs/os/",
                "Operating System Guide",
                &["https://example.org/", "https://example.org/docs/"],
            )
    }

    /// Loads a graph of the form `{ "<url>": { "body": "...", "links": [...] } }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let pages: HashMap<String, FixturePage> = serde_json::from_str(json)?;
        Ok(Self {
            pages,
            ..Self::default()
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn with_page(mut self, url: &str, body: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FixturePage {
                body: body.to_string(),
                links: links.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    /// Delay every fetch by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    /// How many fetches have been served, including failed ones.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Fetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<Page> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        trace!("Fixture fetch {}", url);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.pages
            .get(url)
            .map(|page| Page {
                body: page.body.clone(),
                links: page.links.clone(),
            })
            .ok_or_else(|| CrawlError::NotFound(url.to_string()))
    }
}
