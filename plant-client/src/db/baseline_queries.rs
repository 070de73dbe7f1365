use anyhow::Result;
use sqlx::PgPool;
use time::Date;

use crate::domain::TotalizerBaseline;

/// Most recent baseline effective on or before the given date. Later
/// configurations for the same effective date win.
pub async fn latest_baseline(
    pool: &PgPool,
    totalizer_id: i32,
    on_or_before: Date,
) -> Result<Option<TotalizerBaseline>> {
    let row = sqlx::query_as::<_, TotalizerBaseline>(
        r#"
        SELECT
            totalizer_id,
            effective_date,
            baseline_value,
            reason,
            configured_by,
            configured_at
        FROM totalizer_baselines
        WHERE totalizer_id = $1
          AND effective_date <= $2
        ORDER BY effective_date DESC, configured_at DESC
        LIMIT 1
        "#,
    )
    .bind(totalizer_id)
    .bind(on_or_before)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert_baseline(pool: &PgPool, baseline: &TotalizerBaseline) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO totalizer_baselines
            (totalizer_id, effective_date, baseline_value, reason,
             configured_by, configured_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(baseline.totalizer_id)
    .bind(baseline.effective_date)
    .bind(baseline.baseline_value)
    .bind(&baseline.reason)
    .bind(&baseline.configured_by)
    .bind(baseline.configured_at)
    .execute(pool)
    .await?;

    Ok(())
}
