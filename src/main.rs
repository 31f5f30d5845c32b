use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use std::collections::HashMap;
use std::io;

use learnalyzer_backend::{config::Config, configure, db};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize the database pool
    let pool = db::connect(&config).await.map_err(|e| {
        error!("Failed to connect to the database: {}", e);
        io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
    })?;

    db::run_migrations(&pool).await.map_err(|e| {
        error!("Failed to run migrations: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "learnalyzer".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let bind_address = config.bind_address.clone();
    let workers = num_cpus::get();
    info!("Starting server at {} with {} workers", bind_address, workers);

    let pool = web::Data::new(pool);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(pool.clone())
            .app_data(config.clone())
            .configure(configure)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
