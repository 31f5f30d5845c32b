use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Sum of minutes and mean understanding over one set of activities.
/// Both are `None` when the set is empty.
#[derive(sqlx::FromRow, Debug, Default, Clone, Copy, PartialEq)]
pub struct WindowAggregate {
    pub total_minutes: Option<i64>,
    pub average_understanding: Option<f64>,
}

impl WindowAggregate {
    fn hours(&self) -> f64 {
        self.total_minutes.unwrap_or(0) as f64 / 60.0
    }

    fn understanding(&self) -> f64 {
        self.average_understanding.unwrap_or(0.0)
    }
}

/// Half-open creation-time range `[from, to)`; open ends are unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatedWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl CreatedWindow {
    pub fn all_time() -> Self {
        CreatedWindow { from: None, to: None }
    }

    /// The trailing seven days up to `now`.
    pub fn this_week(now: DateTime<Utc>) -> Self {
        CreatedWindow { from: Some(now - Duration::days(7)), to: None }
    }

    /// The seven days before `this_week`.
    pub fn last_week(now: DateTime<Utc>) -> Self {
        CreatedWindow {
            from: Some(now - Duration::days(14)),
            to: Some(now - Duration::days(7)),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_hours: i64,
    pub total_hours_in_a_week: i64,
    pub average_understanding: String,
    pub most_common_activity: Option<String>,
    pub weekly_change_hours: i64,
    pub weekly_change_understanding: i64,
}

impl StatisticsSummary {
    /// Rounds only here; every intermediate stays unrounded.
    pub fn from_aggregates(
        all_time: WindowAggregate,
        this_week: WindowAggregate,
        last_week: WindowAggregate,
        most_common_activity: Option<String>,
    ) -> Self {
        let weekly_change_hours = this_week.hours() - last_week.hours();
        let weekly_change_understanding = this_week.understanding() - last_week.understanding();

        StatisticsSummary {
            total_hours: all_time.hours().round() as i64,
            total_hours_in_a_week: this_week.hours().round() as i64,
            average_understanding: format!("{:.2}", round_to(all_time.understanding(), 2)),
            most_common_activity,
            weekly_change_hours: weekly_change_hours.round() as i64,
            weekly_change_understanding: weekly_change_understanding.round() as i64,
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn agg(minutes: i64, understanding: f64) -> WindowAggregate {
        WindowAggregate {
            total_minutes: Some(minutes),
            average_understanding: Some(understanding),
        }
    }

    #[test]
    fn empty_history_is_all_zero() {
        let empty = WindowAggregate::default();
        let summary = StatisticsSummary::from_aggregates(empty, empty, empty, None);
        assert_eq!(
            summary,
            StatisticsSummary {
                total_hours: 0,
                total_hours_in_a_week: 0,
                average_understanding: "0.00".to_string(),
                most_common_activity: None,
                weekly_change_hours: 0,
                weekly_change_understanding: 0,
            }
        );
    }

    #[test]
    fn total_hours_rounds_half_away_from_zero() {
        let empty = WindowAggregate::default();
        // 90 minutes = 1.5h
        let summary = StatisticsSummary::from_aggregates(agg(90, 3.0), empty, empty, None);
        assert_eq!(summary.total_hours, 2);

        let summary = StatisticsSummary::from_aggregates(agg(89, 3.0), empty, empty, None);
        assert_eq!(summary.total_hours, 1);
    }

    #[test]
    fn weekly_deltas_use_unrounded_hours() {
        // 50 and 40 minutes round to 1h each, but the delta is computed first
        let this_week = agg(50, 4.0);
        let last_week = agg(40, 2.0);
        let summary = StatisticsSummary::from_aggregates(agg(90, 3.0), this_week, last_week, None);
        assert_eq!(summary.total_hours_in_a_week, 1);
        assert_eq!(summary.weekly_change_hours, 0);
        assert_eq!(summary.weekly_change_understanding, 2);
    }

    #[test]
    fn negative_delta_rounds_away_from_zero() {
        // 0h this week vs 2.5h last week
        let summary = StatisticsSummary::from_aggregates(
            agg(150, 3.0),
            WindowAggregate::default(),
            agg(150, 3.5),
            Some("Reading".to_string()),
        );
        assert_eq!(summary.weekly_change_hours, -3);
        // 0 - 3.5
        assert_eq!(summary.weekly_change_understanding, -4);
        assert_eq!(summary.most_common_activity.as_deref(), Some("Reading"));
    }

    #[test]
    fn average_understanding_has_two_decimals() {
        let empty = WindowAggregate::default();
        let summary = StatisticsSummary::from_aggregates(agg(60, 10.0 / 3.0), empty, empty, None);
        assert_eq!(summary.average_understanding, "3.33");

        let summary = StatisticsSummary::from_aggregates(agg(60, 4.0), empty, empty, None);
        assert_eq!(summary.average_understanding, "4.00");
    }

    #[test]
    fn week_windows_are_adjacent() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let this_week = CreatedWindow::this_week(now);
        let last_week = CreatedWindow::last_week(now);

        assert_eq!(this_week.from, last_week.to);
        assert_eq!(this_week.to, None);
        assert_eq!(last_week.from, Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
        assert_eq!(CreatedWindow::all_time(), CreatedWindow { from: None, to: None });
    }
}
