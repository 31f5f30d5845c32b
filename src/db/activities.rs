use sqlx::PgPool;
use uuid::Uuid;

use crate::models::activity::{Activity, NewActivity};
use crate::models::statistics::{CreatedWindow, WindowAggregate};

const ACTIVITY_COLUMNS: &str = "id, user_id, date, start_time, end_time, duration_minutes, \
     activity_type, sub_type, understanding_level, notes, created_at";

pub async fn insert_activity(pool: &PgPool, new: &NewActivity) -> Result<Activity, sqlx::Error> {
    let sql = format!(
        "INSERT INTO activities (id, user_id, date, start_time, end_time, duration_minutes, \
         activity_type, sub_type, understanding_level, notes, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW()) \
         RETURNING {}",
        ACTIVITY_COLUMNS
    );

    sqlx::query_as::<_, Activity>(&sql)
        .bind(Uuid::now_v7())
        .bind(new.user_id)
        .bind(new.date)
        .bind(&new.start_time)
        .bind(&new.end_time)
        .bind(new.duration_minutes)
        .bind(&new.activity_type)
        .bind(&new.sub_type)
        .bind(new.understanding_level)
        .bind(&new.notes)
        .fetch_one(pool)
        .await
}

/// All of the user's activities, newest calendar date first.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Activity>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM activities WHERE user_id = $1 ORDER BY date DESC, created_at DESC",
        ACTIVITY_COLUMNS
    );

    sqlx::query_as::<_, Activity>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Total minutes and mean understanding of the user's activities created
/// inside `window`.
pub async fn aggregate_window(
    pool: &PgPool,
    user_id: Uuid,
    window: CreatedWindow,
) -> Result<WindowAggregate, sqlx::Error> {
    sqlx::query_as::<_, WindowAggregate>(
        "SELECT SUM(duration_minutes)::BIGINT AS total_minutes, \
                AVG(understanding_level)::FLOAT8 AS average_understanding \
         FROM activities \
         WHERE user_id = $1 \
           AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2) \
           AND ($3::TIMESTAMPTZ IS NULL OR created_at < $3)",
    )
    .bind(user_id)
    .bind(window.from)
    .bind(window.to)
    .fetch_one(pool)
    .await
}

/// The activity type the user logged most often. Equal counts resolve to the
/// alphabetically first type.
pub async fn most_common_type(pool: &PgPool, user_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT activity_type FROM activities \
         WHERE user_id = $1 \
         GROUP BY activity_type \
         ORDER BY COUNT(*) DESC, activity_type ASC \
         LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
