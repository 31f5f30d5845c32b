use actix_web::{web, HttpResponse};
use chrono::Utc;
use futures_util::future::try_join4;
use sqlx::PgPool;

use crate::db::activities::{aggregate_window, most_common_type};
use crate::errors::AppError;
use crate::extractors::AuthUser;
use crate::models::statistics::{CreatedWindow, StatisticsSummary};

// GET /api/statistics
pub async fn get_statistics(
    user: AuthUser,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let pool = pool.get_ref();

    let (all_time, this_week, last_week, most_common) = try_join4(
        aggregate_window(pool, user.id, CreatedWindow::all_time()),
        aggregate_window(pool, user.id, CreatedWindow::this_week(now)),
        aggregate_window(pool, user.id, CreatedWindow::last_week(now)),
        most_common_type(pool, user.id),
    )
    .await?;

    let summary = StatisticsSummary::from_aggregates(all_time, this_week, last_week, most_common);

    Ok(HttpResponse::Ok().json(summary))
}
