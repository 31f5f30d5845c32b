use actix_web::{web, HttpResponse};
use actix_web::rt::task::spawn_blocking;
use bcrypt::{hash, verify};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::config::Config;
use crate::db;
use crate::errors::AppError;
use crate::models::user::PublicUser;
use crate::utils::jwt::{generate_token, Claims};
use crate::utils::validation::validate_payload;

const BCRYPT_COST: u32 = 10;

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, max = 60, message = "Name must be between 2 and 60 characters"))]
    name: String,

    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 8, max = 64, message = "Password must be between 8 and 64 characters"))]
    password: String,
}

#[derive(Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    password: String,
}

#[derive(Serialize)]
struct SignupResponse {
    message: &'static str,
    user: PublicUser,
}

#[derive(Serialize)]
struct SigninResponse {
    token: String,
    user: PublicUser,
}

// POST /api/auth/signup
pub async fn signup(
    pool: web::Data<PgPool>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let SignupRequest { name, email, password } = payload.into_inner();
    let email = email.trim().to_lowercase();

    let password_hash = spawn_blocking(move || hash(&password, BCRYPT_COST))
        .await
        .map_err(|_| AppError::InternalServerError("Hashing failed".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let user_id = uuid::Uuid::now_v7();
    let inserted = db::users::insert_user(&pool, user_id, &name, &email, &password_hash).await?;
    if !inserted {
        return Err(AppError::Conflict("User with this email already exists".to_string()));
    }

    info!("Registered user {}", user_id);

    Ok(HttpResponse::Created().json(SignupResponse {
        message: "User created successfully",
        user: PublicUser { id: user_id, email, name, role: None },
    }))
}

// POST /api/auth/signin
pub async fn signin(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    payload: web::Json<SigninRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let SigninRequest { email, password } = payload.into_inner();
    let email = email.trim().to_lowercase();

    let user = match db::users::find_by_email(&pool, &email).await? {
        Some(user) => user,
        None => {
            warn!("Sign-in attempt for unknown email");
            return Err(AppError::Unauthorized);
        }
    };

    let stored_hash = user.password.clone();
    let is_valid = spawn_blocking(move || verify(password.as_str(), &stored_hash))
        .await
        .map_err(|_| AppError::InternalServerError("Password verification error".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !is_valid {
        warn!("Wrong password for user {}", user.id);
        return Err(AppError::Unauthorized);
    }

    let role = user.role();
    let claims = Claims::new(user.id, &user.email, role, config.jwt_ttl_hours);
    let token = generate_token(&claims, &config.jwt_secret)
        .map_err(|_| AppError::InternalServerError("Token generation error".to_string()))?;

    Ok(HttpResponse::Ok().json(SigninResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: Some(role),
        },
    }))
}
