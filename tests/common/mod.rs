//! Postgres-backed fixtures. Tests that use them return early when
//! `TEST_DATABASE_URL` is not set.
#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use learnalyzer_backend::config::Config;
use learnalyzer_backend::db;
use learnalyzer_backend::models::user::Role;
use learnalyzer_backend::utils::jwt::{generate_token, Claims};

pub const SECRET: &str = "db-test-secret";

pub fn test_database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            None
        }
    }
}

/// Connects and brings the schema up to date.
pub async fn test_pool(url: &str) -> PgPool {
    let _ = env_logger::builder().is_test(true).try_init();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(url)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations on test database");
    pool
}

pub fn test_config(url: &str) -> Config {
    Config {
        database_url: url.to_string(),
        database_max_connections: 5,
        bind_address: "127.0.0.1:0".to_string(),
        jwt_secret: SECRET.to_string(),
        jwt_ttl_hours: 1,
    }
}

pub fn bearer_for(user_id: Uuid) -> String {
    let claims = Claims::new(user_id, "student@mail.com", Role::Student, 1);
    format!("Bearer {}", generate_token(&claims, SECRET).unwrap())
}

/// A user with a unique email so runs never collide.
pub async fn seed_user(pool: &PgPool, name: &str) -> Uuid {
    let id = Uuid::now_v7();
    let email = format!("{}-{}@mail.com", name.to_lowercase(), Uuid::new_v4());
    let inserted = db::users::insert_user(pool, id, name, &email, "not-a-real-hash")
        .await
        .expect("Failed to seed user");
    assert!(inserted);
    id
}

/// Inserts an activity whose `created_at` lies `days_ago` days in the past.
pub async fn seed_activity(
    pool: &PgPool,
    user_id: Uuid,
    activity_type: &str,
    duration_minutes: i32,
    understanding_level: i32,
    days_ago: i64,
) {
    let created_at: DateTime<Utc> = Utc::now() - Duration::days(days_ago);

    sqlx::query(
        "INSERT INTO activities \
            (id, user_id, date, duration_minutes, activity_type, understanding_level, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(created_at.date_naive())
    .bind(duration_minutes)
    .bind(activity_type)
    .bind(understanding_level)
    .bind(created_at)
    .execute(pool)
    .await
    .expect("Failed to seed activity");
}

pub async fn seed_fatigue_row(pool: &PgPool, date: NaiveDate, course_id: &str, stress_level: i32) {
    sqlx::query(
        "INSERT INTO learning_fatigue_metrics \
            (date, student_id, course_id, module_id, instruction_method, start_time, \
             duration_minutes, mood_before, mood_after, stress_level, sleep_hours_prev_night, \
             num_pauses, distraction_events, task_difficulty_rating, perceived_cognitive_load, \
             quiz_score, num_attempts_quiz, time_to_complete_quiz_seconds, \
             comprehension_confidence, opened_feedback, time_to_open_feedback_hours) \
         VALUES ($1, 'S-TEST', $2, 'M1', 'video', $3, 45, 'calm', 'tired', $4, 7.5, \
                 2, 1, 3, 4, 72.5, 1, 600, 3, TRUE, NULL)",
    )
    .bind(date)
    .bind(course_id)
    .bind(Utc::now())
    .bind(stress_level)
    .execute(pool)
    .await
    .expect("Failed to seed fatigue row");
}
