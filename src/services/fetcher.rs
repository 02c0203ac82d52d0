use std::collections::HashSet;
use std::sync::Arc;
use indicatif::ProgressBar;
use crate::config::SubgraphConfig;
use crate::models::Pool;
use crate::sources::PoolPageSource;
use super::filter::PoolFilter;
use super::throttle::Throttle;

/// How a scan ended. `Failed` still carries whatever was accumulated before
/// the error, so callers can tell "nothing significant" from "upstream
/// broke halfway".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The source ran out of pages.
    Complete,
    /// The scanned-pool limit cut the scan short.
    LimitReached,
    /// A page request failed; the scan stopped there.
    Failed(String),
}

#[derive(Debug)]
pub struct FetchResult {
    pub pools: Vec<Pool>,
    pub scanned: usize,
    pub outcome: FetchOutcome,
}

/// Walks the pool listing page by page, id-ascending, keeping the first
/// occurrence of every significant pool.
pub struct PoolFetcher {
    source: Arc<dyn PoolPageSource>,
    filter: PoolFilter,
    page_size: usize,
    max_pools: usize,
    page_delay_ms: u64,
}

impl PoolFetcher {
    pub fn new(source: Arc<dyn PoolPageSource>, filter: PoolFilter, config: &SubgraphConfig) -> Self {
        Self {
            source,
            filter,
            page_size: config.page_size.max(1),
            max_pools: config.max_pools,
            page_delay_ms: config.page_delay_ms,
        }
    }

    pub async fn fetch_all(&self) -> FetchResult {
        let mut seen: HashSet<String> = HashSet::new();
        let mut pools: Vec<Pool> = Vec::new();
        let mut scanned = 0usize;
        let mut last_id = String::new();
        let mut throttle = Throttle::from_millis(self.page_delay_ms);
        let spinner = ProgressBar::new_spinner();

        let outcome = loop {
            if scanned >= self.max_pools {
                break FetchOutcome::LimitReached;
            }

            throttle.wait().await;

            let page = match self.source.fetch_page(&last_id, self.page_size).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Source {} error: {}", self.source.name(), e);
                    break FetchOutcome::Failed(e.to_string());
                }
            };

            let page_len = page.len();
            for pool in page {
                scanned += 1;
                // Cursor advances over every pool, significant or not.
                last_id = pool.id.clone();
                if self.filter.is_significant(&pool) && seen.insert(pool.id.clone()) {
                    pools.push(pool);
                }
            }

            spinner.set_message(format!("{} scanned, {} significant", scanned, pools.len()));

            if page_len < self.page_size {
                break FetchOutcome::Complete;
            }
        };

        spinner.finish_and_clear();
        tracing::info!(
            "Scan finished: {} scanned, {} significant ({:?})",
            scanned,
            pools.len(),
            outcome
        );

        FetchResult { pools, scanned, outcome }
    }
}
