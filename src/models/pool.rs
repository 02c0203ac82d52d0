use serde::{Deserialize, Serialize};

/// One side of a pool pair, as listed by the subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Contract address, lowercase hex string.
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

/// Snapshot of a liquidity pool. The subgraph fields are immutable once
/// fetched; the trailing `Option` fields are filled in by enrichment and
/// stay `None` until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    pub token0: Token,
    pub token1: Token,
    /// Trading fee in parts per million (3000 = 0.3%).
    pub fee_tier: u32,
    /// Raw liquidity units. Kept as f64: values exceed u64 range and only
    /// ever feed ratio math.
    pub liquidity: f64,
    pub total_value_locked_usd: f64,
    pub volume_usd: f64,
    pub tx_count: u64,
    #[serde(default)]
    pub token0_price_usd: Option<f64>,
    #[serde(default)]
    pub token1_price_usd: Option<f64>,
    #[serde(default)]
    pub apr: Option<f64>,
    #[serde(default)]
    pub volume_tvl_ratio: Option<f64>,
}

impl Pool {
    /// Display pair, e.g. "WETH / USDC".
    pub fn pair(&self) -> String {
        format!("{} / {}", self.token0.symbol, self.token1.symbol)
    }

    /// Fee tier as a percentage (3000 ppm -> 0.3).
    pub fn fee_pct(&self) -> f64 {
        self.fee_tier as f64 / 10_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pool() -> Pool {
        Pool {
            id: "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8".to_string(),
            token0: Token {
                id: "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string(),
                symbol: "WETH".to_string(),
                name: "Wrapped Ether".to_string(),
                decimals: 18,
            },
            token1: Token {
                id: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
                symbol: "USDC".to_string(),
                name: "USD Coin".to_string(),
                decimals: 6,
            },
            fee_tier: 3000,
            liquidity: 1.5e18,
            total_value_locked_usd: 250_000_000.0,
            volume_usd: 120_000_000.0,
            tx_count: 4_521,
            token0_price_usd: None,
            token1_price_usd: None,
            apr: None,
            volume_tvl_ratio: None,
        }
    }

    #[test]
    fn pair_and_fee_display() {
        let pool = sample_pool();
        assert_eq!(pool.pair(), "WETH / USDC");
        assert_eq!(pool.fee_pct(), 0.3);
    }

    #[test]
    fn serde_round_trip_preserves_fields() {
        let mut pool = sample_pool();
        pool.apr = Some(12.34);
        pool.volume_tvl_ratio = Some(0.48);
        let json = serde_json::to_string(&pool).unwrap();
        let back: Pool = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pool);
    }

    #[test]
    fn enrichment_fields_default_to_none() {
        // Records written before enrichment carry no apr/ratio keys.
        let raw = r#"{
            "id": "0x01",
            "token0": {"id": "0xaa", "symbol": "A", "name": "A Token", "decimals": 18},
            "token1": {"id": "0xbb", "symbol": "B", "name": "B Token", "decimals": 6},
            "fee_tier": 500,
            "liquidity": 1000.0,
            "total_value_locked_usd": 60000.0,
            "volume_usd": 2000.0,
            "tx_count": 10
        }"#;
        let pool: Pool = serde_json::from_str(raw).unwrap();
        assert!(pool.apr.is_none());
        assert!(pool.token0_price_usd.is_none());
    }
}
