/// Annualized fee yield, in percent, from a pool's fee tier (parts per
/// million), 24h volume and raw liquidity. Non-positive liquidity is
/// substituted with 1 so the division is always defined; the resulting
/// inflated figure is for the significance filter to reject.
pub fn estimate_apr(fee_tier: u32, volume_usd: f64, liquidity: f64) -> f64 {
    let liquidity = if liquidity <= 0.0 { 1.0 } else { liquidity };
    let fee_rate = fee_tier as f64 / 1_000_000.0;
    let daily_fees = fee_rate * volume_usd;
    daily_fees / liquidity * 365.0 * 100.0
}
