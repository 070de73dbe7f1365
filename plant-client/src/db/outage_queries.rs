use anyhow::Result;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::domain::{OutageInterval, OutageType, Scope};

/// Intervals for a unit that overlap the query window. Open intervals
/// (`ended_at IS NULL`) are treated as extending to the window end.
pub async fn outages_overlapping(
    pool: &PgPool,
    unit: Scope,
    window_start: OffsetDateTime,
    window_end: OffsetDateTime,
) -> Result<Vec<OutageInterval>> {
    let rows = sqlx::query_as::<_, OutageInterval>(
        r#"
        SELECT
            id,
            unit,
            outage_type,
            started_at,
            ended_at,
            reason,
            notification_no,
            duration,
            recorded_by,
            created_at
        FROM outage_intervals
        WHERE unit = $1
          AND started_at <= $3
          AND COALESCE(ended_at, $3) >= $2
        ORDER BY started_at
        "#,
    )
    .bind(unit)
    .bind(window_start)
    .bind(window_end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn outage_by_id(pool: &PgPool, id: i64) -> Result<Option<OutageInterval>> {
    let row = sqlx::query_as::<_, OutageInterval>(
        r#"
        SELECT
            id,
            unit,
            outage_type,
            started_at,
            ended_at,
            reason,
            notification_no,
            duration,
            recorded_by,
            created_at
        FROM outage_intervals
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert a new (open) outage and return its id.
pub async fn insert_outage(
    pool: &PgPool,
    unit: Scope,
    outage_type: OutageType,
    started_at: OffsetDateTime,
    reason: Option<&str>,
    notification_no: Option<&str>,
    recorded_by: Option<&str>,
    created_at: OffsetDateTime,
) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO outage_intervals
            (unit, outage_type, started_at, ended_at, reason,
             notification_no, duration, recorded_by, created_at)
        VALUES ($1, $2, $3, NULL, $4, $5, NULL, $6, $7)
        RETURNING id
        "#,
    )
    .bind(unit)
    .bind(outage_type)
    .bind(started_at)
    .bind(reason)
    .bind(notification_no)
    .bind(recorded_by)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Close an open outage, setting its end timestamp and derived duration.
pub async fn close_outage(
    pool: &PgPool,
    id: i64,
    ended_at: OffsetDateTime,
    duration: &str,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE outage_intervals
        SET ended_at = $2,
            duration = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(ended_at)
    .bind(duration)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
