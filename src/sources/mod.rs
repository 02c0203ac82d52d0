pub mod prices;
pub mod subgraph;

use crate::models::Pool;
use async_trait::async_trait;

/// A paginated pool listing. `last_id` is an exclusive lower bound on the
/// pool identifier ("" for the first page); pages come back in ascending
/// id order.
#[async_trait]
pub trait PoolPageSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch_page(&self, last_id: &str, page_size: usize) -> Result<Vec<Pool>, SourceError>;
}

#[derive(Debug)]
pub enum SourceError {
    Network(String),
    Parse(String),
    Upstream(String),
    RateLimit,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Network(e) => write!(f, "Network error: {}", e),
            SourceError::Parse(e) => write!(f, "Parse error: {}", e),
            SourceError::Upstream(e) => write!(f, "Upstream error: {}", e),
            SourceError::RateLimit => write!(f, "Rate limited"),
        }
    }
}
