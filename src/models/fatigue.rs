use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Sessions at or above this stress level are reported as anomalies.
pub const ANOMALY_STRESS_THRESHOLD: i32 = 9;
pub const ANOMALY_LIMIT: i64 = 20;
pub const CORRELATION_SAMPLE_SIZE: i64 = 300;
pub const LOWEST_COURSES_LIMIT: i64 = 5;
pub const STRESS_TREND_DAYS: i64 = 7;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// One row of the externally loaded fatigue dataset. Serialized with the
/// dataset's own snake_case column names.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct LearningFatigueMetric {
    pub id: i32,
    pub date: NaiveDate,
    pub student_id: String,
    pub course_id: String,
    pub module_id: String,
    pub instruction_method: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub mood_before: String,
    pub mood_after: String,
    pub stress_level: i32,
    pub sleep_hours_prev_night: f64,
    pub num_pauses: i32,
    pub distraction_events: i32,
    pub task_difficulty_rating: i32,
    pub perceived_cognitive_load: i32,
    pub quiz_score: f64,
    pub num_attempts_quiz: i32,
    pub time_to_complete_quiz_seconds: i32,
    pub comprehension_confidence: i32,
    pub opened_feedback: bool,
    pub time_to_open_feedback_hours: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseStress {
    pub course_id: String,
    pub average_stress: f64,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStress {
    pub day: NaiveDate,
    pub average_stress: f64,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveLoadBucket {
    pub cognitive_load: i32,
    pub sessions: i64,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoursePerformance {
    pub course_id: String,
    pub average_quiz_score: f64,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DurationStressPoint {
    pub duration_minutes: i32,
    pub stress_level: i32,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StressAnomaly {
    pub id: i32,
    pub date: NaiveDate,
    pub student_id: String,
    pub course_id: String,
    pub module_id: String,
    pub stress_level: i32,
    pub perceived_cognitive_load: i32,
    pub duration_minutes: i32,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FatigueDashboard {
    pub average_stress_by_course: Vec<CourseStress>,
    pub stress_trend: Vec<DailyStress>,
    pub cognitive_load_distribution: Vec<CognitiveLoadBucket>,
    pub lowest_performing_courses: Vec<CoursePerformance>,
    pub duration_stress_correlation: Vec<DurationStressPoint>,
    pub anomalies: Vec<StressAnomaly>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Page defaults to 1 and never goes below it; limit defaults to 10 and is
    /// clamped to `1..=MAX_PAGE_LIMIT`. A page whose offset does not fit in an
    /// `i64` is rejected.
    pub fn resolve(&self) -> Result<(i64, i64), AppError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
        if (page - 1).checked_mul(limit).is_none() {
            return Err(AppError::BadRequest(format!("Page {} is out of range", page)));
        }
        Ok((page, limit))
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Pagination {
            page,
            limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }

    pub fn offset(page: i64, limit: i64) -> i64 {
        (page - 1).saturating_mul(limit)
    }
}

#[derive(Serialize, Debug)]
pub struct FatigueTablePage {
    pub data: Vec<LearningFatigueMetric>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        assert_eq!(PageQuery::default().resolve().unwrap(), (1, 10));
    }

    #[test]
    fn page_query_clamps_out_of_range_values() {
        let query = PageQuery { page: Some(0), limit: Some(1000) };
        assert_eq!(query.resolve().unwrap(), (1, MAX_PAGE_LIMIT));

        let query = PageQuery { page: Some(-4), limit: Some(0) };
        assert_eq!(query.resolve().unwrap(), (1, 1));
    }

    #[test]
    fn page_with_overflowing_offset_is_rejected() {
        let query = PageQuery { page: Some(i64::MAX), limit: Some(100) };
        assert!(matches!(query.resolve(), Err(AppError::BadRequest(_))));

        // limit 1 keeps the offset representable
        let query = PageQuery { page: Some(i64::MAX), limit: Some(1) };
        assert_eq!(query.resolve().unwrap(), (i64::MAX, 1));
        assert_eq!(Pagination::offset(i64::MAX, 100), i64::MAX);
    }

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(Pagination::new(2, 5, 12).total_pages, 3);
        assert_eq!(Pagination::new(1, 5, 10).total_pages, 2);
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 1).total_pages, 1);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Pagination::offset(1, 10), 0);
        assert_eq!(Pagination::offset(2, 5), 5);
        assert_eq!(Pagination::offset(4, 25), 75);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(2, 5, 11)).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["page"], 2);
    }
}
