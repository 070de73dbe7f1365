//! Recompute and persist the auto KPIs for a date range, e.g. after a
//! dependency-table or formula change, or to backfill a gap.
//!
//! usage: recompute_kpis <start-date> [end-date]   (dates as YYYY-MM-DD)

use anyhow::{bail, Context, Result};
use kpi_service::{config::AppConfig, observability, KpiEngine, PgStore, Principal};
use sqlx::postgres::PgPoolOptions;
use std::env;
use time::format_description::well_known::Iso8601;
use time::Date;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: recompute_kpis <start-date> [end-date]");
    }
    let start = parse_date(&args[1])?;
    let end = match args.get(2) {
        Some(raw) => parse_date(raw)?,
        None => start,
    };
    if end < start {
        bail!("end date {end} is before start date {start}");
    }

    let cfg = AppConfig::load()?;
    let pool = PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .connect(&cfg.database.uri)
        .await?;

    let engine = KpiEngine::with_defaults(PgStore::new(pool), cfg.plant.clone());
    let principal = Principal::system();

    let mut summary = serde_json::Map::new();
    let mut total = 0_usize;
    let mut cur = start;
    loop {
        let updated = engine.recompute_day(cur, &principal).await?;
        total += updated;
        tracing::info!(date = %cur, updated, "day recomputed");
        summary.insert(cur.to_string(), serde_json::json!(updated));

        if cur >= end {
            break;
        }
        cur = match cur.next_day() {
            Some(next) => next,
            None => break,
        };
    }

    println!(
        "{}",
        serde_json::json!({
            "start": start.to_string(),
            "end": end.to_string(),
            "updated_kpi_records": total,
            "per_day": summary,
        })
    );

    Ok(())
}

fn parse_date(raw: &str) -> Result<Date> {
    Date::parse(raw, &Iso8601::DEFAULT).with_context(|| format!("invalid date: {raw}"))
}
