pub mod apr;
pub mod cache;
pub mod enrich;
pub mod fetcher;
pub mod filter;
pub mod report;
pub mod throttle;

pub use cache::PoolCache;
pub use fetcher::{FetchOutcome, FetchResult, PoolFetcher};
pub use filter::PoolFilter;
