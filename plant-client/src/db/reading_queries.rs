use anyhow::Result;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};

use crate::domain::TotalizerReading;

/// Fetch every reading submitted for a report date.
pub async fn readings_for_date(pool: &PgPool, date: Date) -> Result<Vec<TotalizerReading>> {
    let rows = sqlx::query_as::<_, TotalizerReading>(
        r#"
        SELECT
            totalizer_id,
            date,
            reading_value,
            adjust_value,
            difference_value,
            username,
            created_at,
            updated_at
        FROM totalizer_readings
        WHERE date = $1
        ORDER BY totalizer_id
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn reading_on(
    pool: &PgPool,
    totalizer_id: i32,
    date: Date,
) -> Result<Option<TotalizerReading>> {
    let row = sqlx::query_as::<_, TotalizerReading>(
        r#"
        SELECT
            totalizer_id,
            date,
            reading_value,
            adjust_value,
            difference_value,
            username,
            created_at,
            updated_at
        FROM totalizer_readings
        WHERE totalizer_id = $1
          AND date = $2
        "#,
    )
    .bind(totalizer_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Idempotent upsert keyed on (totalizer_id, date). `created_at` survives
/// overwrites; `updated_at` tracks the latest submission.
pub async fn upsert_reading(pool: &PgPool, reading: &TotalizerReading) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO totalizer_readings
            (totalizer_id, date, reading_value, adjust_value, difference_value,
             username, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (totalizer_id, date) DO UPDATE SET
            reading_value    = EXCLUDED.reading_value,
            adjust_value     = EXCLUDED.adjust_value,
            difference_value = EXCLUDED.difference_value,
            username         = EXCLUDED.username,
            updated_at       = EXCLUDED.updated_at
        "#,
    )
    .bind(reading.totalizer_id)
    .bind(reading.date)
    .bind(reading.reading_value)
    .bind(reading.adjust_value)
    .bind(reading.difference_value)
    .bind(&reading.username)
    .bind(reading.created_at)
    .bind(reading.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Refresh only the derived difference of an existing row (used when the
/// previous day's reading changes underneath it).
pub async fn update_difference(
    pool: &PgPool,
    totalizer_id: i32,
    date: Date,
    difference_value: f64,
    updated_at: OffsetDateTime,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE totalizer_readings
        SET difference_value = $3,
            updated_at       = $4
        WHERE totalizer_id = $1
          AND date = $2
        "#,
    )
    .bind(totalizer_id)
    .bind(date)
    .bind(difference_value)
    .bind(updated_at)
    .execute(pool)
    .await?;

    Ok(())
}
