mod config;
mod models;
mod sources;
mod services;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use models::Pool;
use services::{enrich, report, FetchOutcome, PoolCache, PoolFetcher, PoolFilter};
use sources::prices::PriceClient;
use sources::subgraph::SubgraphClient;

const USAGE: &str = "\
yield-scanner - scan a DEX subgraph for significant liquidity pools

USAGE:
    yield-scanner [FLAGS]

FLAGS:
    --use-cache    Prefer cached pools; falls back to a live fetch when the
                   cache is missing, empty or stale
    --profit       Print a profit projection table from the cached pools
    -h, --help     Print this help and exit

Configuration is read from config.toml in the working directory.
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print!("{}", USAGE);
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,yield_scanner=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("✓ Configuration loaded");

    let cache = PoolCache::new(&config.cache.file);

    // Check for --profit flag (projection over the cached snapshot)
    if args.contains(&"--profit".to_string()) {
        println!("\n💰 Profit Projection Mode\n");
        match cache.load() {
            Some(pools) if !pools.is_empty() => {
                report::print_projection(&pools, &config.projection);
            }
            Some(_) => println!("Cache is empty - run a scan first."),
            None => println!("No cache at {} - run a scan first.", config.cache.file),
        }
        return Ok(());
    }

    println!("\n🔎 DEX Pool Yield Scanner\n");

    let use_cache = args.contains(&"--use-cache".to_string());
    let filter = PoolFilter::new(&config.filter);
    let subgraph = Arc::new(SubgraphClient::new(&config.subgraph, &config.filter));
    let fetcher = PoolFetcher::new(subgraph, filter.clone(), &config.subgraph);

    let pools = if use_cache {
        match cache.load() {
            Some(cached) => {
                // Cached snapshots go stale; re-apply the filter before use.
                let total = cached.len();
                let valid: Vec<Pool> = cached
                    .into_iter()
                    .filter(|p| filter.is_significant(p))
                    .collect();
                tracing::info!("✓ Cache: {} of {} pools still significant", valid.len(), total);

                if valid.is_empty() {
                    tracing::info!("Cache unusable, falling back to live fetch");
                    fetch_live(&fetcher, &cache).await
                } else {
                    valid
                }
            }
            None => fetch_live(&fetcher, &cache).await,
        }
    } else {
        fetch_live(&fetcher, &cache).await
    };

    if pools.is_empty() {
        println!("No significant pools found.");
        return Ok(());
    }

    let addresses = enrich::collect_token_addresses(&pools);
    tracing::info!("Resolving prices for {} tokens", addresses.len());
    let price_client = PriceClient::new(&config.price_api);
    let prices = price_client.fetch_prices(&addresses).await;

    let enriched = enrich::enrich_pools(pools, &prices);
    if enriched.is_empty() {
        // Keep the pre-enrichment snapshot instead of clobbering it with an
        // empty list; a price-service outage lands here.
        println!("No priceable pools to report.");
        return Ok(());
    }

    report::print_report(&enriched);
    cache.save(&enriched);

    Ok(())
}

/// Live scan, snapshotted to cache before enrichment.
async fn fetch_live(fetcher: &PoolFetcher, cache: &PoolCache) -> Vec<Pool> {
    println!("📥 Scanning pools (live fetch)...");
    let result = fetcher.fetch_all().await;
    if let FetchOutcome::Failed(ref reason) = result.outcome {
        tracing::warn!("Scan degraded to partial results: {}", reason);
    }
    cache.save(&result.pools);
    result.pools
}
