use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::authorization;
use crate::auth::jwt::{self, JwtSecret};
use crate::auth::session::{Session, SessionCache};
use crate::db::users::find_or_create_from_auth;
use crate::error::ApiError;
use crate::models::users::{self, CreateUserFromAuth};

/// Any caller holding a valid token.
pub struct AuthenticatedUser {
    pub user: users::Model,
    pub session: Session,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let bearer = BearerAuth::extract(&req).await?;

            // 2. Validate it against the shared secret.
            let secret = req
                .app_data::<web::Data<JwtSecret>>()
                .ok_or_else(|| ApiError::Internal("JWT secret not configured".into()))?;
            let claims = jwt::validate_token(bearer.token(), &secret.0)
                .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {e}")))?;

            let user_id = claims.user_id().map_err(ApiError::Unauthorized)?;

            // 3. Resolve the user, from cache when possible.
            let sessions = req
                .app_data::<web::Data<SessionCache>>()
                .ok_or_else(|| ApiError::Internal("Session cache not configured".into()))?;

            let user = match sessions.get(&user_id).await {
                Some(user) => user,
                None => {
                    let email = claims.user_email().ok_or_else(|| {
                        ApiError::Unauthorized("No email in token claims".into())
                    })?;
                    let db = req
                        .app_data::<web::Data<DatabaseConnection>>()
                        .ok_or_else(|| ApiError::Internal("Database not configured".into()))?;

                    let user = find_or_create_from_auth(
                        db.get_ref(),
                        CreateUserFromAuth {
                            id: user_id,
                            email,
                            username: claims.username.clone(),
                            display_name: claims.display_name(),
                        },
                    )
                    .await
                    .map_err(ApiError::from)?;

                    sessions.insert(user.clone()).await;
                    user
                }
            };

            let session = Session::new(&user, &claims);
            Ok(AuthenticatedUser { user, session })
        })
    }
}

/// A caller whose stored role is `admin`.
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let authenticated = AuthenticatedUser::from_request(req, payload);

        Box::pin(async move {
            let user = authenticated.await?;
            authorization::require_admin(&user.session)?;
            Ok(AdminUser(user))
        })
    }
}
