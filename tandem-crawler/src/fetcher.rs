use crate::error::Result;
use std::future::Future;

/// A fetched page: its body and the URLs it links to, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub body: String,
    pub links: Vec<String>,
}

/// Retrieves the body and outbound links for a URL.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Page>> + Send;
}
