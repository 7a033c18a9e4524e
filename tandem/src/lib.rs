pub mod commands;
pub mod crawl;
pub mod handlers;

// Re-export commonly used items for convenience
pub use crawl::{
    CrawlOptions, CrawlOutcome, CrawlResultCallback, execute_crawl, extract_url_path,
    generate_crawl_report, generate_visit_report, load_fetcher,
};
pub use handlers::{compare_trees, describe_tree, walk_values};
