pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod fixture;
pub mod result;

pub use crawler::{Crawler, ProgressCallback, ResultCallback, crawl};
pub use error::CrawlError;
pub use fetcher::{Fetcher, Page};
pub use fixture::{FixtureFetcher, SAMPLE_ROOT};
pub use result::CrawlResult;
