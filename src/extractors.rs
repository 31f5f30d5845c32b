use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::utils::jwt::Claims;

/// The authenticated caller, taken from the claims the auth middleware stored
/// on the request. Every user-scoped query filters on `id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<Claims>()
            .and_then(|claims| {
                Uuid::parse_str(&claims.sub)
                    .ok()
                    .map(|id| AuthUser { id, role: claims.role })
            })
            .ok_or(AppError::Unauthorized);
        ready(user)
    }
}
