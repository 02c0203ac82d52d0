use crate::config::ProjectionConfig;
use crate::models::Pool;

/// Compact display for USD amounts: K/M/B suffixes above a thousand, two
/// decimals below, "N/A" for NaN and friends.
pub fn format_big_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{:.2}", value)
    }
}

/// One report line per enriched pool.
pub fn print_report(pools: &[Pool]) {
    println!(
        "\n⏱️  {} - {} pools",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        pools.len()
    );
    println!(
        "\n{:<44} {:<16} {:>6} {:>10} {:>10} {:>9} {:>8}",
        "Pool", "Pair", "Fee%", "TVL($)", "Vol24h($)", "APR(%)", "V/TVL"
    );
    println!("{}", "─".repeat(108));

    for pool in pools {
        println!(
            "{:<44} {:<16} {:>6.2} {:>10} {:>10} {:>9.2} {:>8.3}",
            pool.id,
            pool.pair(),
            pool.fee_pct(),
            format_big_number(pool.total_value_locked_usd),
            format_big_number(pool.volume_usd),
            pool.apr.unwrap_or(f64::NAN),
            pool.volume_tvl_ratio.unwrap_or(f64::NAN),
        );
    }

    println!("\n✓ {} significant pools", pools.len());
}

/// Daily fee income on a position, from a percent-scale APR.
pub fn daily_profit(apr_pct: f64, position_usd: f64) -> f64 {
    position_usd * apr_pct / 100.0 / 365.0
}

/// Flat (non-compounding) cumulative profit series, one entry per day.
pub fn simulate_cumulative(daily_profit: f64, days: u32) -> Vec<f64> {
    let mut series = Vec::with_capacity(days as usize);
    let mut total = 0.0;
    for _ in 0..days {
        total += daily_profit;
        series.push(total);
    }
    series
}

#[derive(Debug, Clone)]
pub struct ProjectionRow {
    pub address: String,
    pub pair: String,
    pub apr: f64,
    pub cumulative_profit: f64,
}

/// Projection rows for every pool that carries an APR, best cumulative
/// profit first. Pools never enriched are skipped.
pub fn projection_rows(pools: &[Pool], config: &ProjectionConfig) -> Vec<ProjectionRow> {
    let mut rows: Vec<ProjectionRow> = pools
        .iter()
        .filter_map(|pool| {
            let apr = pool.apr?;
            let daily = daily_profit(apr, config.position_usd);
            let series = simulate_cumulative(daily, config.days);
            let cumulative_profit = series.last().copied()?;
            Some(ProjectionRow {
                address: pool.id.clone(),
                pair: pool.pair(),
                apr,
                cumulative_profit,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.cumulative_profit.partial_cmp(&a.cumulative_profit).unwrap());
    rows
}

pub fn print_projection(pools: &[Pool], config: &ProjectionConfig) {
    let rows = projection_rows(pools, config);
    let skipped = pools.len() - rows.len();
    if skipped > 0 {
        tracing::info!("Skipped {} pools without an APR", skipped);
    }

    println!(
        "\n💰 Profit projection: ${:.2} position over {} days\n",
        config.position_usd, config.days
    );
    println!(
        "{:<44} {:<20} {:>10} {:>22}",
        "Pool Address", "Pair", "APR (%)", "Cumulative Profit ($)"
    );
    println!("{}", "─".repeat(98));

    for row in &rows {
        println!(
            "{:<44} {:<20} {:>10.2} {:>22.2}",
            row.address, row.pair, row.apr, row.cumulative_profit
        );
    }
}
