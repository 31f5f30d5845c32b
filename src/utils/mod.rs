pub mod jwt;
pub mod time;
pub mod validation;
