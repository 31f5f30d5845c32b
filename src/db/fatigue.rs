use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::fatigue::{
    CognitiveLoadBucket, CourseStress, CoursePerformance, DailyStress, DurationStressPoint,
    LearningFatigueMetric, StressAnomaly,
};

pub async fn average_stress_by_course(pool: &PgPool) -> Result<Vec<CourseStress>, sqlx::Error> {
    sqlx::query_as::<_, CourseStress>(
        "SELECT course_id, AVG(stress_level)::FLOAT8 AS average_stress \
         FROM learning_fatigue_metrics \
         GROUP BY course_id \
         ORDER BY course_id",
    )
    .fetch_all(pool)
    .await
}

/// Mean stress per calendar day for sessions dated in `since..=until`.
pub async fn stress_trend(
    pool: &PgPool,
    since: NaiveDate,
    until: NaiveDate,
) -> Result<Vec<DailyStress>, sqlx::Error> {
    sqlx::query_as::<_, DailyStress>(
        "SELECT date AS day, AVG(stress_level)::FLOAT8 AS average_stress \
         FROM learning_fatigue_metrics \
         WHERE date >= $1 AND date <= $2 \
         GROUP BY date \
         ORDER BY date ASC",
    )
    .bind(since)
    .bind(until)
    .fetch_all(pool)
    .await
}

pub async fn cognitive_load_distribution(pool: &PgPool) -> Result<Vec<CognitiveLoadBucket>, sqlx::Error> {
    sqlx::query_as::<_, CognitiveLoadBucket>(
        "SELECT perceived_cognitive_load AS cognitive_load, COUNT(*) AS sessions \
         FROM learning_fatigue_metrics \
         GROUP BY perceived_cognitive_load \
         ORDER BY perceived_cognitive_load",
    )
    .fetch_all(pool)
    .await
}

pub async fn lowest_scoring_courses(pool: &PgPool, limit: i64) -> Result<Vec<CoursePerformance>, sqlx::Error> {
    sqlx::query_as::<_, CoursePerformance>(
        "SELECT course_id, AVG(quiz_score)::FLOAT8 AS average_quiz_score \
         FROM learning_fatigue_metrics \
         GROUP BY course_id \
         ORDER BY average_quiz_score ASC, course_id ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// The most recent `limit` (duration, stress) pairs.
pub async fn duration_stress_sample(pool: &PgPool, limit: i64) -> Result<Vec<DurationStressPoint>, sqlx::Error> {
    sqlx::query_as::<_, DurationStressPoint>(
        "SELECT duration_minutes, stress_level \
         FROM learning_fatigue_metrics \
         ORDER BY date DESC, start_time DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn stress_anomalies(
    pool: &PgPool,
    threshold: i32,
    limit: i64,
) -> Result<Vec<StressAnomaly>, sqlx::Error> {
    sqlx::query_as::<_, StressAnomaly>(
        "SELECT id, date, student_id, course_id, module_id, stress_level, \
                perceived_cognitive_load, duration_minutes \
         FROM learning_fatigue_metrics \
         WHERE stress_level >= $1 \
         ORDER BY date DESC, start_time DESC \
         LIMIT $2",
    )
    .bind(threshold)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn fetch_page(
    pool: &PgPool,
    offset: i64,
    limit: i64,
) -> Result<Vec<LearningFatigueMetric>, sqlx::Error> {
    sqlx::query_as::<_, LearningFatigueMetric>(
        "SELECT id, date, student_id, course_id, module_id, instruction_method, start_time, \
                duration_minutes, mood_before, mood_after, stress_level, sleep_hours_prev_night, \
                num_pauses, distraction_events, task_difficulty_rating, perceived_cognitive_load, \
                quiz_score, num_attempts_quiz, time_to_complete_quiz_seconds, \
                comprehension_confidence, opened_feedback, time_to_open_feedback_hours, created_at \
         FROM learning_fatigue_metrics \
         ORDER BY date DESC, id DESC \
         OFFSET $1 LIMIT $2",
    )
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM learning_fatigue_metrics")
        .fetch_one(pool)
        .await
}
