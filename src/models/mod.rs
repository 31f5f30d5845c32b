pub mod activity;
pub mod fatigue;
pub mod statistics;
pub mod user;
