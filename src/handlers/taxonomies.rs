use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AdminUser, AuthenticatedUser};
use crate::cache::{CacheData, RedisCache, keys};
use crate::config::AppConfig;
use crate::db::taxonomies as taxonomy_db;
use crate::error::{ApiError, ApiResult};
use crate::models::taxonomies::{self, TaxonomyInput, TaxonomyKind};

fn parse_kind(segment: &str) -> Result<TaxonomyKind, ApiError> {
    TaxonomyKind::from_segment(segment)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown taxonomy '{segment}'")))
}

async fn invalidate(cache: &RedisCache, kind: TaxonomyKind) {
    if let Err(e) = cache.delete(&keys::taxonomy_list(kind)).await {
        tracing::warn!("Cache error: {}", e);
    }
}

/// GET /api/taxonomies/{kind} — list every term of one kind (cached).
pub async fn get_terms(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let kind = parse_kind(&path)?;
    let cache_key = keys::taxonomy_list(kind);

    // Try to get from cache first
    match cache.get::<Vec<taxonomies::Model>>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        // Cache error - fall back to database
        Err(e) => tracing::warn!("Cache error: {}", e),
    }

    let terms = taxonomy_db::get_terms(db.get_ref(), kind).await?;
    if let Err(e) = cache
        .set(&cache_key, &terms, Some(config.cache.taxonomy_ttl))
        .await
    {
        tracing::warn!("Cache error: {}", e);
    }
    Ok(HttpResponse::Ok().json(terms))
}

/// POST /api/taxonomies/{kind} — add a term (admin only).
pub async fn create_term(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<String>,
    body: web::Json<TaxonomyInput>,
) -> ApiResult<HttpResponse> {
    let kind = parse_kind(&path)?;
    let term = taxonomy_db::insert_term(db.get_ref(), kind, &body.name).await?;
    invalidate(&cache, kind).await;
    Ok(HttpResponse::Created().json(term))
}

/// PUT /api/taxonomies/{kind}/{id} — rename a term (admin only).
pub async fn rename_term(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<(String, Uuid)>,
    body: web::Json<TaxonomyInput>,
) -> ApiResult<HttpResponse> {
    let (segment, id) = path.into_inner();
    let kind = parse_kind(&segment)?;
    let term = taxonomy_db::rename_term(db.get_ref(), kind, id, &body.name).await?;
    invalidate(&cache, kind).await;
    Ok(HttpResponse::Ok().json(term))
}

/// DELETE /api/taxonomies/{kind}/{id} — remove a term (admin only).
pub async fn delete_term(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<(String, Uuid)>,
) -> ApiResult<HttpResponse> {
    let (segment, id) = path.into_inner();
    let kind = parse_kind(&segment)?;
    let result = taxonomy_db::delete_term(db.get_ref(), kind, id).await?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("{} {id} not found", kind.label())));
    }
    invalidate(&cache, kind).await;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("{} {id} deleted", kind.label()),
    })))
}
