use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AdminUser, AuthenticatedUser};
use crate::db::projects as project_db;
use crate::error::{ApiError, ApiResult};
use crate::models::PaginationQuery;
use crate::models::projects::{BulkDelete, CreateProject, UpdateProject};

/// GET /api/projects — list projects with pagination and optional search.
/// Query params: ?page=1&limit=20&search=acme
pub async fn get_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> ApiResult<HttpResponse> {
    let page = project_db::get_projects_paginated(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/projects/{id} — get a single project.
pub async fn get_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    match project_db::get_project_by_id(db.get_ref(), id).await? {
        Some(project) => Ok(HttpResponse::Ok().json(project)),
        None => Err(ApiError::NotFound(format!("Project {id} not found"))),
    }
}

/// POST /api/projects — create a project.
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner().validate()?;
    let project = project_db::insert_project(db.get_ref(), input).await?;

    tracing::info!(project_id = %project.id, user_id = %user.session.user_id, "Project created");
    Ok(HttpResponse::Created().json(project))
}

/// PUT /api/projects/{id} — update a project.
pub async fn update_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let updated = project_db::update_project(db.get_ref(), id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/projects/{id} — delete a project (admin only).
pub async fn delete_project(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let result = project_db::delete_project(db.get_ref(), id).await?;

    if result.rows_affected > 0 {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Project {id} deleted"),
        })))
    } else {
        Err(ApiError::NotFound(format!("Project {id} not found")))
    }
}

/// POST /api/projects/bulk-delete — delete several projects at once (admin only).
pub async fn bulk_delete_projects(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<BulkDelete>,
) -> ApiResult<HttpResponse> {
    let ids = body.into_inner().ids;
    if ids.is_empty() {
        return Err(ApiError::BadRequest("No project ids given".into()));
    }

    let requested = ids.len();
    let result = project_db::delete_projects(db.get_ref(), ids).await?;

    tracing::info!(
        requested,
        deleted = result.rows_affected,
        user_id = %admin.0.session.user_id,
        "Bulk delete"
    );
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "deleted": result.rows_affected,
    })))
}
