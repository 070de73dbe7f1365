use anyhow::Result;
use sqlx::PgPool;
use time::Date;

use crate::domain::{KpiOffset, PeriodType};

/// All offsets configured for one (period_type, period_start).
pub async fn offsets_for_period(
    pool: &PgPool,
    period_type: PeriodType,
    period_start: Date,
) -> Result<Vec<KpiOffset>> {
    let rows = sqlx::query_as::<_, KpiOffset>(
        r#"
        SELECT
            period_type,
            period_start,
            period_end,
            scope,
            kpi_name,
            offset_value,
            reason,
            source,
            configured_by,
            configured_at
        FROM kpi_offsets
        WHERE period_type = $1
          AND period_start = $2
        ORDER BY scope, kpi_name
        "#,
    )
    .bind(period_type)
    .bind(period_start)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Idempotent upsert keyed on (period_type, period_start, scope, kpi_name).
pub async fn upsert_offset(pool: &PgPool, offset: &KpiOffset) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO kpi_offsets
            (period_type, period_start, period_end, scope, kpi_name,
             offset_value, reason, source, configured_by, configured_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (period_type, period_start, scope, kpi_name) DO UPDATE SET
            period_end    = EXCLUDED.period_end,
            offset_value  = EXCLUDED.offset_value,
            reason        = EXCLUDED.reason,
            source        = EXCLUDED.source,
            configured_by = EXCLUDED.configured_by,
            configured_at = EXCLUDED.configured_at
        "#,
    )
    .bind(offset.period_type)
    .bind(offset.period_start)
    .bind(offset.period_end)
    .bind(offset.scope)
    .bind(&offset.kpi_name)
    .bind(offset.offset_value)
    .bind(&offset.reason)
    .bind(&offset.source)
    .bind(&offset.configured_by)
    .bind(offset.configured_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Drop every offset for a period ahead of a bulk replace.
pub async fn delete_offsets_for_period(
    pool: &PgPool,
    period_type: PeriodType,
    period_start: Date,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM kpi_offsets
        WHERE period_type = $1
          AND period_start = $2
        "#,
    )
    .bind(period_type)
    .bind(period_start)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
