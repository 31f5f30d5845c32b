use actix_web::{web, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::db;
use crate::errors::AppError;
use crate::extractors::AuthUser;
use crate::models::activity::{Activity, NewActivity};
use crate::utils::time::{duration_minutes, parse_activity_date};
use crate::utils::validation::field_errors;

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    #[validate(required(message = "Date is required"))]
    #[validate(length(min = 1, message = "Date is required"))]
    #[validate(custom = "crate::utils::validation::validate_activity_date")]
    date: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_clock_time")]
    start_time: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_clock_time")]
    end_time: Option<String>,

    #[validate(required(message = "Activity type is required"))]
    #[validate(length(min = 1, message = "Activity type is required"))]
    activity_type: Option<String>,

    sub_type: Option<String>,

    #[validate(required(message = "Understanding level is required"))]
    #[validate(range(min = 1.0, max = 5.0, message = "Understanding level must be between 1 and 5"))]
    understanding_level: Option<f64>,

    notes: Option<String>,
}

impl ActivityRequest {
    /// Declarative checks plus the whole-number rule on the level, all
    /// reported in one field map.
    fn validate_request(&self) -> Result<(), AppError> {
        let mut fields = match self.validate() {
            Ok(()) => Default::default(),
            Err(err) => field_errors(&err),
        };

        if let Some(level) = self.understanding_level {
            if level.fract() != 0.0 {
                fields
                    .entry("understandingLevel".to_string())
                    .or_insert_with(Vec::new)
                    .push("Understanding level must be a whole number".to_string());
            }
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(fields))
        }
    }

    /// Turns a validated request into an insertable record for `user_id`.
    fn into_new_activity(self, user_id: uuid::Uuid) -> Result<NewActivity, AppError> {
        let date = self
            .date
            .as_deref()
            .and_then(parse_activity_date)
            .ok_or_else(|| AppError::BadRequest("Invalid date format".to_string()))?;
        let understanding_level = self
            .understanding_level
            .filter(|level| (1.0..=5.0).contains(level) && level.fract() == 0.0)
            .ok_or_else(|| AppError::BadRequest("Invalid understanding level".to_string()))?
            as i32;
        let activity_type = self
            .activity_type
            .ok_or_else(|| AppError::BadRequest("Activity type is required".to_string()))?;

        let start_time = self.start_time.filter(|t| !t.is_empty());
        let end_time = self.end_time.filter(|t| !t.is_empty());
        let duration_minutes = duration_minutes(date, start_time.as_deref(), end_time.as_deref());

        Ok(NewActivity {
            user_id,
            date,
            start_time: start_time.unwrap_or_default(),
            end_time: end_time.unwrap_or_default(),
            duration_minutes,
            activity_type,
            sub_type: self.sub_type.unwrap_or_default(),
            understanding_level,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

#[derive(Serialize)]
struct CreatedActivityResponse {
    message: &'static str,
    activity: Activity,
}

#[derive(Serialize)]
struct ActivityListResponse {
    activities: Vec<Activity>,
}

// POST /api/activities
pub async fn create_activity(
    user: AuthUser,
    pool: web::Data<PgPool>,
    payload: web::Json<ActivityRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate_request()?;

    let new_activity = payload.into_inner().into_new_activity(user.id)?;
    let activity = db::activities::insert_activity(&pool, &new_activity).await?;

    info!(
        "Activity {} created for user {} ({} min)",
        activity.id, user.id, activity.duration_minutes
    );

    Ok(HttpResponse::Created().json(CreatedActivityResponse {
        message: "Activity created successfully",
        activity,
    }))
}

// GET /api/activities
pub async fn get_activities(
    user: AuthUser,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let activities = db::activities::list_for_user(&pool, user.id).await?;

    Ok(HttpResponse::Ok().json(ActivityListResponse { activities }))
}
