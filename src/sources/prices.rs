use reqwest::Client;
use std::collections::HashMap;
use crate::config::PriceApiConfig;
use crate::services::throttle::Throttle;
use super::SourceError;

/// Batch token-price lookup against a CoinGecko-style endpoint. Addresses
/// go out in fixed-size comma-joined batches with a pacing delay between
/// them.
pub struct PriceClient {
    client: Client,
    url: String,
    platform: String,
    currency: String,
    batch_size: usize,
    batch_delay_ms: u64,
}

impl PriceClient {
    pub fn new(config: &PriceApiConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap(),
            url: config.url.clone(),
            platform: config.platform.clone(),
            currency: config.currency.clone(),
            batch_size: config.batch_size.max(1),
            batch_delay_ms: config.batch_delay_ms,
        }
    }

    /// Resolve USD prices for the given token addresses. Returns lowercased
    /// address -> price. Any failure degrades to an empty map; callers treat
    /// missing entries as price 0.
    pub async fn fetch_prices(&self, addresses: &[String]) -> HashMap<String, f64> {
        let mut prices = HashMap::new();
        let mut throttle = Throttle::from_millis(self.batch_delay_ms);

        for batch in addresses.chunks(self.batch_size) {
            throttle.wait().await;
            match self.fetch_batch(batch).await {
                Ok(batch_prices) => prices.extend(batch_prices),
                Err(e) => {
                    tracing::warn!("Price lookup failed: {}", e);
                    return HashMap::new();
                }
            }
        }

        prices
    }

    async fn fetch_batch(&self, addresses: &[String]) -> Result<HashMap<String, f64>, SourceError> {
        let url = format!(
            "{}/simple/token_price/{}?contract_addresses={}&vs_currencies={}",
            self.url,
            self.platform,
            addresses.join(","),
            self.currency
        );

        let resp = self.client.get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if resp.status() == 429 {
            return Err(SourceError::RateLimit);
        }

        if !resp.status().is_success() {
            return Err(SourceError::Upstream(format!("status {}", resp.status())));
        }

        let data: HashMap<String, HashMap<String, serde_json::Value>> = resp.json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(collect_prices(data, &self.currency))
    }
}

/// Tokens without a usable price entry are dropped, not errors.
fn collect_prices(
    data: HashMap<String, HashMap<String, serde_json::Value>>,
    currency: &str,
) -> HashMap<String, f64> {
    data.into_iter()
        .filter_map(|(address, quotes)| {
            let price = quotes.get(currency)?.as_f64()?;
            Some((address.to_lowercase(), price))
        })
        .collect()
}
