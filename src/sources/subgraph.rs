use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use crate::config::{FilterConfig, SubgraphConfig};
use crate::models::{Pool, Token};
use super::{PoolPageSource, SourceError};

const POOLS_QUERY: &str = r#"
    query Pools($pageSize: Int!, $lastId: ID!, $minTvl: BigDecimal!, $minVolume: BigDecimal!) {
        pools(
            first: $pageSize
            orderBy: id
            where: {
                id_gt: $lastId
                totalValueLockedUSD_gte: $minTvl
                volumeUSD_gte: $minVolume
            }
        ) {
            id
            token0 { id symbol name decimals }
            token1 { id symbol name decimals }
            feeTier
            liquidity
            totalValueLockedUSD
            volumeUSD
            txCount
        }
    }
"#;

/// Client for the pool listing subgraph. One GraphQL query per page; the
/// TVL/volume floors are pushed server-side so dust pools never travel.
pub struct SubgraphClient {
    client: Client,
    url: String,
    min_tvl_usd: f64,
    min_volume_usd: f64,
}

#[derive(Debug, Deserialize)]
struct GraphResponse {
    data: Option<PoolsData>,
    errors: Option<Vec<GraphError>>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PoolsData {
    pools: Vec<RawPool>,
}

// The Graph serves every numeric field as a decimal string.
#[derive(Debug, Deserialize)]
struct RawPool {
    id: String,
    token0: RawToken,
    token1: RawToken,
    #[serde(rename = "feeTier")]
    fee_tier: String,
    liquidity: String,
    #[serde(rename = "totalValueLockedUSD")]
    total_value_locked_usd: String,
    #[serde(rename = "volumeUSD")]
    volume_usd: String,
    #[serde(rename = "txCount")]
    tx_count: String,
}

#[derive(Debug, Deserialize)]
struct RawToken {
    id: String,
    symbol: String,
    name: String,
    decimals: String,
}

impl RawToken {
    fn into_token(self) -> Option<Token> {
        let decimals = self.decimals.parse::<u8>().ok()?;
        Some(Token {
            id: self.id.to_lowercase(),
            symbol: self.symbol,
            name: self.name,
            decimals,
        })
    }
}

impl RawPool {
    /// Records with unparsable numerics are dropped, not fatal.
    fn into_pool(self) -> Option<Pool> {
        let fee_tier = self.fee_tier.parse::<u32>().ok()?;
        let liquidity = self.liquidity.parse::<f64>().ok()?;
        let total_value_locked_usd = self.total_value_locked_usd.parse::<f64>().ok()?;
        let volume_usd = self.volume_usd.parse::<f64>().ok()?;
        let tx_count = self.tx_count.parse::<u64>().ok()?;
        Some(Pool {
            id: self.id.to_lowercase(),
            token0: self.token0.into_token()?,
            token1: self.token1.into_token()?,
            fee_tier,
            liquidity,
            total_value_locked_usd,
            volume_usd,
            tx_count,
            token0_price_usd: None,
            token1_price_usd: None,
            apr: None,
            volume_tvl_ratio: None,
        })
    }
}

impl SubgraphClient {
    pub fn new(config: &SubgraphConfig, filter: &FilterConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap(),
            url: config.url.clone(),
            min_tvl_usd: filter.min_tvl_usd,
            min_volume_usd: filter.min_volume_usd,
        }
    }
}

#[async_trait]
impl PoolPageSource for SubgraphClient {
    fn name(&self) -> &'static str {
        "Subgraph"
    }

    async fn fetch_page(&self, last_id: &str, page_size: usize) -> Result<Vec<Pool>, SourceError> {
        let body = json!({
            "query": POOLS_QUERY,
            "variables": {
                "pageSize": page_size,
                "lastId": last_id,
                "minTvl": self.min_tvl_usd.to_string(),
                "minVolume": self.min_volume_usd.to_string(),
            },
        });

        let resp = self.client.post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if resp.status() == 429 {
            return Err(SourceError::RateLimit);
        }

        if !resp.status().is_success() {
            return Err(SourceError::Upstream(format!("status {}", resp.status())));
        }

        let graph: GraphResponse = resp.json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        if let Some(errors) = graph.errors {
            let message = errors.into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SourceError::Upstream(message));
        }

        let raw = graph.data
            .map(|d| d.pools)
            .ok_or_else(|| SourceError::Parse("response without data".to_string()))?;

        let total = raw.len();
        let pools: Vec<Pool> = raw.into_iter()
            .filter_map(|p| p.into_pool())
            .collect();

        if pools.len() < total {
            tracing::debug!("Skipped {} malformed pool records", total - pools.len());
        }

        Ok(pools)
    }
}
