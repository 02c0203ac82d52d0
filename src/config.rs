use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub subgraph: SubgraphConfig,
    pub price_api: PriceApiConfig,
    pub cache: CacheConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubgraphConfig {
    pub url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_pools")]
    pub max_pools: usize,
    #[serde(default = "default_delay_ms")]
    pub page_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PriceApiConfig {
    pub url: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_delay_ms")]
    pub batch_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub file: String,
}

/// Pool admission thresholds. APR bounds are in percent units, the same
/// scale `estimate_apr` returns.
#[derive(Debug, Deserialize, Clone)]
pub struct FilterConfig {
    #[serde(default = "default_min_tvl")]
    pub min_tvl_usd: f64,
    #[serde(default = "default_min_volume")]
    pub min_volume_usd: f64,
    #[serde(default = "default_min_apr")]
    pub min_apr_pct: f64,
    #[serde(default = "default_max_apr")]
    pub max_apr_pct: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProjectionConfig {
    #[serde(default = "default_position")]
    pub position_usd: f64,
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_page_size() -> usize { 50 }
fn default_max_pools() -> usize { 1000 }
fn default_delay_ms() -> u64 { 100 }
fn default_platform() -> String { "ethereum".to_string() }
fn default_currency() -> String { "usd".to_string() }
fn default_batch_size() -> usize { 10 }
fn default_min_tvl() -> f64 { 50_000.0 }
fn default_min_volume() -> f64 { 1_000.0 }
fn default_min_apr() -> f64 { 0.05 }
fn default_max_apr() -> f64 { 200.0 }
fn default_position() -> f64 { 100.0 }
fn default_days() -> u32 { 365 }

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_tvl_usd: default_min_tvl(),
            min_volume_usd: default_min_volume(),
            min_apr_pct: default_min_apr(),
            max_apr_pct: default_max_apr(),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            position_usd: default_position(),
            days: default_days(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path, e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let raw = r#"
            [subgraph]
            url = "https://example.com/subgraph"
            page_size = 25
            max_pools = 500
            page_delay_ms = 50

            [price_api]
            url = "https://example.com/prices"
            currency = "eur"

            [cache]
            file = "pools.json"

            [filter]
            min_tvl_usd = 10000.0
            min_volume_usd = 500.0
            min_apr_pct = 1.0
            max_apr_pct = 100.0

            [projection]
            position_usd = 250.0
            days = 30
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.subgraph.page_size, 25);
        assert_eq!(config.subgraph.max_pools, 500);
        assert_eq!(config.price_api.currency, "eur");
        assert_eq!(config.price_api.platform, "ethereum");
        assert_eq!(config.cache.file, "pools.json");
        assert_eq!(config.filter.min_tvl_usd, 10_000.0);
        assert_eq!(config.projection.days, 30);
    }

    #[test]
    fn optional_sections_default() {
        let raw = r#"
            [subgraph]
            url = "https://example.com/subgraph"

            [price_api]
            url = "https://example.com/prices"

            [cache]
            file = "pools.json"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.subgraph.page_size, 50);
        assert_eq!(config.subgraph.max_pools, 1000);
        assert_eq!(config.price_api.batch_size, 10);
        assert_eq!(config.filter.min_tvl_usd, 50_000.0);
        assert_eq!(config.filter.max_apr_pct, 200.0);
        assert_eq!(config.projection.position_usd, 100.0);
        assert_eq!(config.projection.days, 365);
    }

    #[test]
    fn missing_required_section_fails() {
        let raw = r#"
            [subgraph]
            url = "https://example.com/subgraph"
        "#;
        assert!(toml::from_str::<Config>(raw).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load_from("no_such_config.toml").is_err());
    }
}
