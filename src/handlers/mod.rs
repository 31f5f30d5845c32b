pub mod activity;
pub mod auth;
pub mod fatigue;
pub mod statistics;
