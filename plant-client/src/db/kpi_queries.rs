use anyhow::Result;
use sqlx::PgPool;
use time::Date;

use crate::domain::KpiRecord;

/// All persisted KPI records (auto, energy and manual) for a report date.
pub async fn kpis_for_date(pool: &PgPool, date: Date) -> Result<Vec<KpiRecord>> {
    let rows = sqlx::query_as::<_, KpiRecord>(
        r#"
        SELECT
            report_date,
            kind,
            scope,
            kpi_name,
            value,
            unit,
            username,
            created_at,
            updated_at
        FROM kpi_records
        WHERE report_date = $1
        ORDER BY scope, kpi_name
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Idempotent upsert keyed on (report_date, kind, scope, kpi_name).
pub async fn upsert_kpi(pool: &PgPool, record: &KpiRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO kpi_records
            (report_date, kind, scope, kpi_name, value, unit,
             username, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (report_date, kind, scope, kpi_name) DO UPDATE SET
            value      = EXCLUDED.value,
            unit       = EXCLUDED.unit,
            username   = EXCLUDED.username,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(record.report_date)
    .bind(record.kind)
    .bind(record.scope)
    .bind(&record.kpi_name)
    .bind(record.value)
    .bind(&record.unit)
    .bind(&record.username)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}
