use serde::Serialize;
use uuid::Uuid;
use chrono::{NaiveDate, Utc};

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i32,
    pub activity_type: String,
    pub sub_type: String,
    pub understanding_level: i32,
    pub notes: String,
    pub created_at: chrono::DateTime<Utc>,
}

/// A validated submission, ready to insert. Optional text fields are stored
/// as empty strings.
#[derive(Debug)]
pub struct NewActivity {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i32,
    pub activity_type: String,
    pub sub_type: String,
    pub understanding_level: i32,
    pub notes: String,
}
