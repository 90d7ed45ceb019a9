use actix_web::http::header;
use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::config::AppConfig;
use crate::db::projects as project_db;
use crate::error::{ApiError, ApiResult};
use crate::transfer::{export_csv, import_csv};

/// POST /api/projects/import — body is the CSV file; returns the import outcome.
pub async fn import_projects(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let text = std::str::from_utf8(&body)
        .map_err(|_| ApiError::BadRequest("CSV file must be UTF-8 text".into()))?;

    tracing::info!(user_id = %user.session.user_id, bytes = body.len(), "CSV import started");
    let outcome = import_csv(db.get_ref(), text, config.import_concurrency).await;
    Ok(HttpResponse::Ok().json(outcome))
}

/// GET /api/projects/export — every project as a downloadable CSV file.
pub async fn export_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let projects = project_db::get_all_projects(db.get_ref()).await?;
    let csv = export_csv(&projects)?;
    let filename = format!("projects-{}.csv", chrono::Utc::now().format("%Y-%m-%d"));

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(csv))
}
