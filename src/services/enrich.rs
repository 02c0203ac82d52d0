use std::collections::{BTreeSet, HashMap};
use crate::models::Pool;
use super::apr::estimate_apr;

/// Tokens quoted below this are treated as unpriced; a quote of zero or a
/// missing entry both land here.
pub const MIN_TOKEN_PRICE_USD: f64 = 1e-6;

/// Unique lowercased token addresses across both sides of every pool,
/// sorted so price batches are deterministic.
pub fn collect_token_addresses(pools: &[Pool]) -> Vec<String> {
    let mut addresses = BTreeSet::new();
    for pool in pools {
        addresses.insert(pool.token0.id.to_lowercase());
        addresses.insert(pool.token1.id.to_lowercase());
    }
    addresses.into_iter().collect()
}

/// Attach token prices, the re-derived APR and the volume/TVL ratio to each
/// pool. Pools where either token has no usable price are dropped entirely
/// rather than reported with bogus numbers.
pub fn enrich_pools(pools: Vec<Pool>, prices: &HashMap<String, f64>) -> Vec<Pool> {
    pools
        .into_iter()
        .filter_map(|mut pool| {
            let price0 = prices
                .get(&pool.token0.id.to_lowercase())
                .copied()
                .unwrap_or(0.0);
            let price1 = prices
                .get(&pool.token1.id.to_lowercase())
                .copied()
                .unwrap_or(0.0);

            if price0 < MIN_TOKEN_PRICE_USD || price1 < MIN_TOKEN_PRICE_USD {
                tracing::debug!("Dropping unpriceable pool {} ({})", pool.pair(), pool.id);
                return None;
            }

            pool.token0_price_usd = Some(price0);
            pool.token1_price_usd = Some(price1);
            pool.apr = Some(estimate_apr(pool.fee_tier, pool.volume_usd, pool.liquidity));
            pool.volume_tvl_ratio = Some(pool.volume_usd / pool.total_value_locked_usd);
            Some(pool)
        })
        .collect()
}
