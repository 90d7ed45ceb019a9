use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::taxonomies::{self, TaxonomyKind};

/// Fetch every term of one kind, alphabetically.
pub async fn get_terms(
    db: &DatabaseConnection,
    kind: TaxonomyKind,
) -> Result<Vec<taxonomies::Model>, DbErr> {
    taxonomies::Entity::find()
        .filter(taxonomies::Column::Kind.eq(kind))
        .order_by_asc(taxonomies::Column::Name)
        .all(db)
        .await
}

/// Insert a new term. Names are unique per kind, ignoring case.
pub async fn insert_term(
    db: &DatabaseConnection,
    kind: TaxonomyKind,
    name: &str,
) -> Result<taxonomies::Model, ApiError> {
    let name = required_name(kind, name)?;
    let term = taxonomies::ActiveModel {
        id: Set(Uuid::new_v4()),
        kind: Set(kind),
        name: Set(name.clone()),
        created_at: Set(chrono::Utc::now()),
    };

    term.insert(db)
        .await
        .map_err(|e| name_conflict(e, kind, &name))
}

/// Rename an existing term.
pub async fn rename_term(
    db: &DatabaseConnection,
    kind: TaxonomyKind,
    id: Uuid,
    name: &str,
) -> Result<taxonomies::Model, ApiError> {
    let name = required_name(kind, name)?;
    let term = find_term(db, kind, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", kind.label())))?;

    let mut active: taxonomies::ActiveModel = term.into();
    active.name = Set(name.clone());

    active
        .update(db)
        .await
        .map_err(|e| name_conflict(e, kind, &name))
}

/// Delete a term; the kind must match so one list cannot delete from another.
pub async fn delete_term(
    db: &DatabaseConnection,
    kind: TaxonomyKind,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    taxonomies::Entity::delete_many()
        .filter(taxonomies::Column::Id.eq(id))
        .filter(taxonomies::Column::Kind.eq(kind))
        .exec(db)
        .await
}

async fn find_term(
    db: &DatabaseConnection,
    kind: TaxonomyKind,
    id: Uuid,
) -> Result<Option<taxonomies::Model>, DbErr> {
    taxonomies::Entity::find_by_id(id)
        .filter(taxonomies::Column::Kind.eq(kind))
        .one(db)
        .await
}

fn required_name(kind: TaxonomyKind, name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Unprocessable(format!(
            "{} name is required",
            kind.label()
        )));
    }
    Ok(name.to_string())
}

fn name_conflict(err: DbErr, kind: TaxonomyKind, name: &str) -> ApiError {
    match ApiError::from(err) {
        ApiError::Conflict(_) => {
            ApiError::Conflict(format!("{} '{name}' already exists", kind.label()))
        }
        other => other,
    }
}
