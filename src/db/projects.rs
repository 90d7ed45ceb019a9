use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::projects::{self, CreateProject, NewProject, StringList, UpdateProject};
use crate::models::{Paginated, PaginationQuery};

/// Insert a validated project. A name that collides (case-insensitively)
/// with an existing one is reported as a conflict.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: NewProject,
) -> Result<projects::Model, ApiError> {
    let name = input.project_name.clone();
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_name: Set(input.project_name),
        technology: Set(input.technology),
        category: Set(input.category),
        industry: Set(input.industry),
        description: Set(input.description),
        page_builder: Set(input.page_builder),
        client_name: Set(input.client_name),
        website_link: Set(input.website_link),
        bid_platform: Set(input.bid_platform),
        bid_platform_url: Set(input.bid_platform_url),
        invoice_amount: Set(input.invoice_amount),
        start_date: Set(input.start_date),
        completion_date: Set(input.completion_date),
        testimonials: Set(input.testimonials),
        tag: Set(StringList(input.tag)),
        client_invoices: Set(StringList(input.client_invoices)),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_project
        .insert(db)
        .await
        .map_err(|e| name_conflict(e, &name))
}

/// Fetch one page of projects, newest first.
pub async fn get_projects_paginated(
    db: &DatabaseConnection,
    query: &PaginationQuery,
) -> Result<Paginated<projects::Model>, DbErr> {
    let mut select = projects::Entity::find().order_by_desc(projects::Column::CreatedAt);
    if let Some(search) = query.search() {
        select = select.filter(
            Condition::any()
                .add(projects::Column::ProjectName.contains(search))
                .add(projects::Column::ClientName.contains(search))
                .add(projects::Column::Technology.contains(search)),
        );
    }

    let paginator = select.paginate(db, query.limit());
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(query.page() - 1).await?;

    Ok(Paginated {
        items,
        total,
        page: query.page(),
        limit: query.limit(),
    })
}

/// Fetch every project, ordered by name. Used by the CSV export.
pub async fn get_all_projects(db: &DatabaseConnection) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .order_by_asc(projects::Column::ProjectName)
        .all(db)
        .await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Every stored project name, as stored.
pub async fn get_project_names(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    projects::Entity::find()
        .select_only()
        .column(projects::Column::ProjectName)
        .into_tuple::<String>()
        .all(db)
        .await
}

/// Update an existing project. The merged record is validated with the
/// same rules as a create.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, ApiError> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {id} not found")))?;

    let merged = CreateProject::from(project.clone()).apply(input).validate()?;
    let name = merged.project_name.clone();

    let mut active: projects::ActiveModel = project.into();
    active.project_name = Set(merged.project_name);
    active.technology = Set(merged.technology);
    active.category = Set(merged.category);
    active.industry = Set(merged.industry);
    active.description = Set(merged.description);
    active.page_builder = Set(merged.page_builder);
    active.client_name = Set(merged.client_name);
    active.website_link = Set(merged.website_link);
    active.bid_platform = Set(merged.bid_platform);
    active.bid_platform_url = Set(merged.bid_platform_url);
    active.invoice_amount = Set(merged.invoice_amount);
    active.start_date = Set(merged.start_date);
    active.completion_date = Set(merged.completion_date);
    active.testimonials = Set(merged.testimonials);
    active.tag = Set(StringList(merged.tag));
    active.client_invoices = Set(StringList(merged.client_invoices));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await.map_err(|e| name_conflict(e, &name))
}

/// Delete a project by ID.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}

/// Delete every project whose ID is in `ids`.
pub async fn delete_projects(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_many()
        .filter(projects::Column::Id.is_in(ids))
        .exec(db)
        .await
}

fn name_conflict(err: DbErr, name: &str) -> ApiError {
    match ApiError::from(err) {
        ApiError::Conflict(_) => ApiError::Conflict(format!("Project '{name}' already exists")),
        other => other,
    }
}
