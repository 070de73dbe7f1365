use plant_client::domain::{OutageInterval, OutageType};
use time::OffsetDateTime;

use super::formula::round_to;

/// Running-hour / availability picture for one unit over a query window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutageKpis {
    pub running_hour: f64,
    pub plant_availability_percent: f64,
    pub planned_outage_hour: f64,
    pub planned_outage_percent: f64,
    pub strategic_outage_hour: f64,
}

impl OutageKpis {
    /// A window with no outages at all: full running hours.
    pub fn idle_day() -> Self {
        Self {
            running_hour: 24.0,
            plant_availability_percent: 100.0,
            planned_outage_hour: 0.0,
            planned_outage_percent: 0.0,
            strategic_outage_hour: 0.0,
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("running_hour", self.running_hour),
            ("plant_availability_percent", self.plant_availability_percent),
            ("planned_outage_hour", self.planned_outage_hour),
            ("planned_outage_percent", self.planned_outage_percent),
            ("strategic_outage_hour", self.strategic_outage_hour),
        ]
    }
}

/// UTC day window `[midnight, next midnight)` for single-day overlap
/// queries.
pub fn day_window(date: time::Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.midnight().assume_utc();
    (start, start + time::Duration::days(1))
}

/// Hours of overlap between an interval and `[window_start, window_end]`.
/// Open intervals (`ended_at = None`) run to the window end. Intervals
/// entirely outside the window contribute zero.
pub fn overlap_hours(
    interval: &OutageInterval,
    window_start: OffsetDateTime,
    window_end: OffsetDateTime,
) -> f64 {
    let end = interval.ended_at.unwrap_or(window_end).min(window_end);
    let start = interval.started_at.max(window_start);
    if end <= start {
        return 0.0;
    }
    (end - start).as_seconds_f64() / 3600.0
}

/// Split outage hours into planned/strategic buckets and derive running
/// hours and availability.
///
/// Every overlapping interval reduces running hours via the shutdown
/// total, but only Planned and Strategic get a named bucket; Forced
/// outages are tracked implicitly. The legacy reports rely on this
/// asymmetry.
pub fn outage_kpis(
    intervals: &[OutageInterval],
    window_start: OffsetDateTime,
    window_end: OffsetDateTime,
) -> OutageKpis {
    let window_hours = (window_end - window_start).as_seconds_f64() / 3600.0;
    if window_hours <= 0.0 {
        return OutageKpis {
            running_hour: 0.0,
            plant_availability_percent: 0.0,
            planned_outage_hour: 0.0,
            planned_outage_percent: 0.0,
            strategic_outage_hour: 0.0,
        };
    }

    let mut total_shutdown = 0.0;
    let mut planned = 0.0;
    let mut strategic = 0.0;

    for interval in intervals {
        let hours = overlap_hours(interval, window_start, window_end);
        if hours <= 0.0 {
            continue;
        }
        total_shutdown += hours;
        match interval.outage_type {
            OutageType::Planned => planned += hours,
            OutageType::Strategic => strategic += hours,
            OutageType::Forced => {}
        }
    }

    let running = (window_hours - total_shutdown).max(0.0);

    OutageKpis {
        running_hour: round_to(running, 2),
        plant_availability_percent: round_to(running / window_hours * 100.0, 2),
        planned_outage_hour: round_to(planned, 2),
        planned_outage_percent: round_to(planned / window_hours * 100.0, 2),
        strategic_outage_hour: round_to(strategic, 2),
    }
}

/// Human-readable outage duration, derived when an interval is closed.
pub fn format_duration(from: OffsetDateTime, to: OffsetDateTime) -> String {
    let total_minutes = ((to - from).whole_seconds() / 60).max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let days = hours / 24;
    let hours = hours % 24;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plant_client::domain::Scope;
    use time::macros::datetime;

    fn interval(
        outage_type: OutageType,
        started_at: OffsetDateTime,
        ended_at: Option<OffsetDateTime>,
    ) -> OutageInterval {
        OutageInterval {
            id: 1,
            unit: Scope::Unit1,
            outage_type,
            started_at,
            ended_at,
            reason: None,
            notification_no: None,
            duration: None,
            recorded_by: None,
            created_at: started_at,
        }
    }

    const DAY_START: OffsetDateTime = datetime!(2026-01-15 00:00 UTC);
    const DAY_END: OffsetDateTime = datetime!(2026-01-16 00:00 UTC);

    #[test]
    fn planned_and_strategic_buckets_split() {
        let intervals = vec![
            interval(
                OutageType::Planned,
                datetime!(2026-01-15 02:00 UTC),
                Some(datetime!(2026-01-15 05:00 UTC)),
            ),
            interval(
                OutageType::Strategic,
                datetime!(2026-01-15 10:00 UTC),
                Some(datetime!(2026-01-15 12:00 UTC)),
            ),
        ];

        let kpis = outage_kpis(&intervals, DAY_START, DAY_END);
        assert_eq!(kpis.planned_outage_hour, 3.0);
        assert_eq!(kpis.strategic_outage_hour, 2.0);
        assert_eq!(kpis.running_hour, 19.0);
        assert_eq!(kpis.plant_availability_percent, 79.17);
    }

    #[test]
    fn forced_outage_reduces_running_without_a_bucket() {
        let intervals = vec![interval(
            OutageType::Forced,
            datetime!(2026-01-15 06:00 UTC),
            Some(datetime!(2026-01-15 10:00 UTC)),
        )];

        let kpis = outage_kpis(&intervals, DAY_START, DAY_END);
        assert_eq!(kpis.running_hour, 20.0);
        assert_eq!(kpis.planned_outage_hour, 0.0);
        assert_eq!(kpis.strategic_outage_hour, 0.0);
    }

    #[test]
    fn open_interval_runs_to_window_end() {
        let intervals = vec![interval(
            OutageType::Planned,
            datetime!(2026-01-15 20:00 UTC),
            None,
        )];

        let kpis = outage_kpis(&intervals, DAY_START, DAY_END);
        assert_eq!(kpis.planned_outage_hour, 4.0);
        assert_eq!(kpis.running_hour, 20.0);
    }

    #[test]
    fn intervals_outside_window_contribute_zero() {
        let before = interval(
            OutageType::Planned,
            datetime!(2026-01-14 06:00 UTC),
            Some(datetime!(2026-01-14 10:00 UTC)),
        );
        let after = interval(
            OutageType::Planned,
            datetime!(2026-01-16 06:00 UTC),
            Some(datetime!(2026-01-16 10:00 UTC)),
        );

        assert_eq!(overlap_hours(&before, DAY_START, DAY_END), 0.0);
        assert_eq!(overlap_hours(&after, DAY_START, DAY_END), 0.0);

        let kpis = outage_kpis(&[before, after], DAY_START, DAY_END);
        assert_eq!(kpis.running_hour, 24.0);
        assert_eq!(kpis.plant_availability_percent, 100.0);
    }

    #[test]
    fn interval_spanning_window_is_clamped() {
        let spanning = interval(
            OutageType::Strategic,
            datetime!(2026-01-14 12:00 UTC),
            Some(datetime!(2026-01-17 12:00 UTC)),
        );
        assert_eq!(overlap_hours(&spanning, DAY_START, DAY_END), 24.0);

        let kpis = outage_kpis(&[spanning], DAY_START, DAY_END);
        assert_eq!(kpis.running_hour, 0.0);
        assert_eq!(kpis.plant_availability_percent, 0.0);
    }

    #[test]
    fn running_plus_shutdown_equals_window_for_closed_intervals() {
        let intervals = vec![
            interval(
                OutageType::Planned,
                datetime!(2026-01-15 01:30 UTC),
                Some(datetime!(2026-01-15 04:15 UTC)),
            ),
            interval(
                OutageType::Forced,
                datetime!(2026-01-15 18:00 UTC),
                Some(datetime!(2026-01-15 19:00 UTC)),
            ),
        ];

        let kpis = outage_kpis(&intervals, DAY_START, DAY_END);
        let shutdown: f64 = intervals
            .iter()
            .map(|i| overlap_hours(i, DAY_START, DAY_END))
            .sum();
        assert!((kpis.running_hour + shutdown - 24.0).abs() < 1e-9);
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(
            format_duration(
                datetime!(2026-01-15 02:00 UTC),
                datetime!(2026-01-15 07:30 UTC)
            ),
            "5h 30m"
        );
        assert_eq!(
            format_duration(
                datetime!(2026-01-15 02:00 UTC),
                datetime!(2026-01-17 04:05 UTC)
            ),
            "2d 2h 5m"
        );
    }
}
