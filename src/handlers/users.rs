use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{forbid_self, require_self_or_admin};
use crate::auth::middleware::{AdminUser, AuthenticatedUser};
use crate::auth::session::SessionCache;
use crate::db::users as user_db;
use crate::error::{ApiError, ApiResult};
use crate::models::users::{UpdateUser, UserResponse};
use crate::models::{Paginated, PaginationQuery};

/// GET /api/users — list users with pagination (admin only).
/// Query params: ?page=1&limit=20&search=alice
pub async fn get_users(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> ApiResult<HttpResponse> {
    let page = user_db::get_users_paginated(db.get_ref(), &query).await?;
    let response = Paginated {
        items: page.items.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/{id} — get a single user (self or admin).
pub async fn get_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    require_self_or_admin(&user.session, id)?;

    match user_db::get_user_by_id(db.get_ref(), id).await? {
        Some(found) => Ok(HttpResponse::Ok().json(UserResponse::from(found))),
        None => Err(ApiError::NotFound(format!("User {id} not found"))),
    }
}

/// PUT /api/users/{id} — update a user. Users may edit their own profile;
/// only admins may change roles, and never their own.
pub async fn update_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    sessions: web::Data<SessionCache>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUser>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let input = body.into_inner();
    require_self_or_admin(&user.session, id)?;

    if input.role.is_some() {
        if !user.session.is_admin() {
            return Err(ApiError::Forbidden("Only admins can change roles".into()));
        }
        forbid_self(&user.session, id, "change the role of")?;
    }

    let updated = user_db::update_user(db.get_ref(), id, input).await?;
    sessions.invalidate(&id).await;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// DELETE /api/users/{id} — delete a user (admin only, not oneself).
pub async fn delete_user(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    sessions: web::Data<SessionCache>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    forbid_self(&admin.0.session, id, "delete")?;

    let result = user_db::delete_user(db.get_ref(), id).await?;
    if result.rows_affected > 0 {
        sessions.invalidate(&id).await;
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": format!("User {id} deleted"),
        })))
    } else {
        Err(ApiError::NotFound(format!("User {id} not found")))
    }
}
