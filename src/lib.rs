pub mod config;
pub mod db;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod utils;

use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::errors::AppError;

/// Registers every API route. The caller provides `web::Data<PgPool>` and
/// `web::Data<Config>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let auth = HttpAuthentication::with_fn(utils::jwt::validator);

    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::resource("/api/auth/signup")
                .route(web::post().to(handlers::auth::signup)),
        )
        .service(
            web::resource("/api/auth/signin")
                .route(web::post().to(handlers::auth::signin)),
        )
        .service(
            web::resource("/api/activities")
                .wrap(auth.clone())
                .route(web::get().to(handlers::activity::get_activities))
                .route(web::post().to(handlers::activity::create_activity)),
        )
        .service(
            web::resource("/api/statistics")
                .wrap(auth.clone())
                .route(web::get().to(handlers::statistics::get_statistics)),
        )
        .service(
            web::resource("/api/dashboard/fatigue")
                .wrap(auth.clone())
                .route(web::get().to(handlers::fatigue::get_fatigue_dashboard)),
        )
        .service(
            web::resource("/api/table")
                .wrap(auth)
                .route(web::get().to(handlers::fatigue::get_fatigue_table)),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid JSON payload: {}", err)).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid query parameters: {}", err)).into())
}
