use crate::models::Pool;
use crate::config::FilterConfig;
use super::apr::estimate_apr;

/// Admission thresholds for the significant-pool set.
#[derive(Clone)]
pub struct PoolFilter {
    min_tvl_usd: f64,
    min_volume_usd: f64,
    min_apr_pct: f64,
    max_apr_pct: f64,
}

impl PoolFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            min_tvl_usd: config.min_tvl_usd,
            min_volume_usd: config.min_volume_usd,
            min_apr_pct: config.min_apr_pct,
            max_apr_pct: config.max_apr_pct,
        }
    }

    /// A pool is significant when its volume is a real number, TVL and
    /// volume clear their floors (inclusive), and the estimated APR lands
    /// in [min, max) and is finite.
    pub fn is_significant(&self, pool: &Pool) -> bool {
        if !pool.volume_usd.is_finite() || pool.volume_usd == 0.0 {
            return false;
        }

        if pool.total_value_locked_usd < self.min_tvl_usd {
            return false;
        }

        if pool.volume_usd < self.min_volume_usd {
            return false;
        }

        let apr = estimate_apr(pool.fee_tier, pool.volume_usd, pool.liquidity);
        if !apr.is_finite() {
            return false;
        }

        let significant = apr >= self.min_apr_pct && apr < self.max_apr_pct;
        if significant {
            tracing::trace!("    ✓ {} passes (APR {:.2}%, TVL ${:.0})",
                pool.pair(), apr, pool.total_value_locked_usd);
        }
        significant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;

    fn filter() -> PoolFilter {
        PoolFilter::new(&FilterConfig::default())
    }

    fn token(id: &str, symbol: &str) -> Token {
        Token {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            decimals: 18,
        }
    }

    /// TVL 100k, volume 100k, fee 3000 ppm, liquidity tuned so the APR
    /// lands mid-range: 0.003 * 100_000 / 1_000_000 * 365 * 100 = 10.95%.
    fn passing_pool() -> Pool {
        Pool {
            id: "0x01".to_string(),
            token0: token("0xaa", "AAA"),
            token1: token("0xbb", "BBB"),
            fee_tier: 3000,
            liquidity: 1_000_000.0,
            total_value_locked_usd: 100_000.0,
            volume_usd: 100_000.0,
            tx_count: 100,
            token0_price_usd: None,
            token1_price_usd: None,
            apr: None,
            volume_tvl_ratio: None,
        }
    }

    #[test]
    fn accepts_a_mid_range_pool() {
        assert!(filter().is_significant(&passing_pool()));
    }

    #[test]
    fn tvl_floor_is_inclusive() {
        let mut pool = passing_pool();
        pool.total_value_locked_usd = 50_000.0;
        assert!(filter().is_significant(&pool));

        pool.total_value_locked_usd = 49_999.99;
        assert!(!filter().is_significant(&pool));
    }

    #[test]
    fn volume_floor_is_inclusive() {
        let mut pool = passing_pool();
        // Keep the APR in range while volume sits on the floor.
        pool.volume_usd = 1_000.0;
        pool.liquidity = 10_000.0;
        assert!(filter().is_significant(&pool));

        pool.volume_usd = 999.99;
        assert!(!filter().is_significant(&pool));
    }

    #[test]
    fn apr_ceiling_is_exclusive() {
        let mut pool = passing_pool();
        // APR = 0.003 * volume / liquidity * 36500. liquidity such that
        // APR is exactly 200: volume * 0.003 * 36500 / 200.
        pool.volume_usd = 100_000.0;
        pool.liquidity = 0.003 * 100_000.0 * 36_500.0 / 200.0;
        assert_eq!(
            estimate_apr(pool.fee_tier, pool.volume_usd, pool.liquidity),
            200.0
        );
        assert!(!filter().is_significant(&pool));

        pool.liquidity *= 1.001; // nudges APR just below 200
        assert!(filter().is_significant(&pool));
    }

    #[test]
    fn apr_floor_is_inclusive() {
        let mut pool = passing_pool();
        // APR exactly at the 0.05 floor.
        pool.liquidity = 0.003 * pool.volume_usd * 36_500.0 / 0.05;
        assert_eq!(
            estimate_apr(pool.fee_tier, pool.volume_usd, pool.liquidity),
            0.05
        );
        assert!(filter().is_significant(&pool));

        pool.liquidity *= 1.001; // below the floor
        assert!(!filter().is_significant(&pool));
    }

    #[test]
    fn rejects_zero_and_non_finite_volume() {
        let mut pool = passing_pool();
        pool.volume_usd = 0.0;
        assert!(!filter().is_significant(&pool));

        pool.volume_usd = f64::NAN;
        assert!(!filter().is_significant(&pool));

        pool.volume_usd = f64::INFINITY;
        assert!(!filter().is_significant(&pool));
    }

    #[test]
    fn rejects_zero_liquidity_via_apr_bounds() {
        // Zero liquidity substitutes 1 in the estimator, which makes the
        // APR astronomically large and pushes it past the ceiling.
        let mut pool = passing_pool();
        pool.liquidity = 0.0;
        assert!(!filter().is_significant(&pool));
    }

    #[test]
    fn honors_custom_thresholds() {
        let config = FilterConfig {
            min_tvl_usd: 10.0,
            min_volume_usd: 10.0,
            min_apr_pct: 0.0,
            max_apr_pct: 1e12,
        };
        let mut pool = passing_pool();
        pool.total_value_locked_usd = 11.0;
        pool.volume_usd = 11.0;
        assert!(PoolFilter::new(&config).is_significant(&pool));
    }
}
