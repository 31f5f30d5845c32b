use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use futures_util::future::try_join;
use log::debug;
use sqlx::PgPool;

use crate::db::fatigue;
use crate::errors::AppError;
use crate::extractors::AuthUser;
use crate::models::fatigue::{
    FatigueDashboard, FatigueTablePage, PageQuery, Pagination, ANOMALY_LIMIT,
    ANOMALY_STRESS_THRESHOLD, CORRELATION_SAMPLE_SIZE, LOWEST_COURSES_LIMIT, STRESS_TREND_DAYS,
};

// GET /api/dashboard/fatigue
//
// Aggregates over the whole dataset; the caller only has to be signed in.
pub async fn get_fatigue_dashboard(
    _user: AuthUser,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref();
    let today = Utc::now().date_naive();
    let trend_since = today - Duration::days(STRESS_TREND_DAYS - 1);

    let (
        average_stress_by_course,
        stress_trend,
        cognitive_load_distribution,
        lowest_performing_courses,
        duration_stress_correlation,
        anomalies,
    ) = tokio::try_join!(
        fatigue::average_stress_by_course(pool),
        fatigue::stress_trend(pool, trend_since, today),
        fatigue::cognitive_load_distribution(pool),
        fatigue::lowest_scoring_courses(pool, LOWEST_COURSES_LIMIT),
        fatigue::duration_stress_sample(pool, CORRELATION_SAMPLE_SIZE),
        fatigue::stress_anomalies(pool, ANOMALY_STRESS_THRESHOLD, ANOMALY_LIMIT),
    )?;

    debug!("Fatigue dashboard: {} anomalies since {}", anomalies.len(), trend_since);

    Ok(HttpResponse::Ok().json(FatigueDashboard {
        average_stress_by_course,
        stress_trend,
        cognitive_load_distribution,
        lowest_performing_courses,
        duration_stress_correlation,
        anomalies,
    }))
}

// GET /api/table?page=&limit=
pub async fn get_fatigue_table(
    _user: AuthUser,
    pool: web::Data<PgPool>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let (page, limit) = query.resolve()?;
    let pool = pool.get_ref();

    let (data, total) = try_join(
        fatigue::fetch_page(pool, Pagination::offset(page, limit), limit),
        fatigue::count(pool),
    )
    .await?;

    Ok(HttpResponse::Ok().json(FatigueTablePage {
        data,
        pagination: Pagination::new(page, limit, total),
    }))
}
