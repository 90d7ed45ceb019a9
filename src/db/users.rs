use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::users::{self, CreateUserFromAuth, Roles, UpdateUser};
use crate::models::{Paginated, PaginationQuery};

/// Find the user behind a token, creating the row on first sight.
/// The very first account becomes the admin; later ones are plain users.
pub async fn find_or_create_from_auth(
    db: &DatabaseConnection,
    input: CreateUserFromAuth,
) -> Result<users::Model, DbErr> {
    if let Some(existing) = users::Entity::find_by_id(input.id).one(db).await? {
        return Ok(existing);
    }

    let role = if users::Entity::find().count(db).await? == 0 {
        Roles::Admin
    } else {
        Roles::User
    };

    let new_user = users::ActiveModel {
        id: Set(input.id),
        email: Set(input.email),
        username: Set(input.username),
        display_name: Set(input.display_name),
        role: Set(role),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    tracing::info!(user_id = %input.id, ?role, "Created user from token");
    new_user.insert(db).await
}

/// Fetch one page of users, oldest first.
pub async fn get_users_paginated(
    db: &DatabaseConnection,
    query: &PaginationQuery,
) -> Result<Paginated<users::Model>, DbErr> {
    let mut select = users::Entity::find().order_by_asc(users::Column::CreatedAt);
    if let Some(search) = query.search() {
        select = select.filter(
            Condition::any()
                .add(users::Column::Email.contains(search))
                .add(users::Column::Username.contains(search)),
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

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Number of accounts holding the admin role.
pub async fn count_admins(db: &DatabaseConnection) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(Roles::Admin))
        .count(db)
        .await
}

/// Update an existing user. Demoting the last remaining admin is refused.
pub async fn update_user(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateUser,
) -> Result<users::Model, ApiError> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {id} not found")))?;

    if user.role == Roles::Admin
        && input.role == Some(Roles::User)
        && count_admins(db).await? <= 1
    {
        return Err(ApiError::Unprocessable(
            "Cannot demote the last admin".into(),
        ));
    }

    let mut active: users::ActiveModel = user.into();

    if let Some(email) = input.email.map(|e| e.trim().to_string()) {
        if email.is_empty() {
            return Err(ApiError::Unprocessable("Email cannot be empty".into()));
        }
        active.email = Set(email);
    }
    if let Some(username) = input.username {
        let username = username.trim().to_string();
        active.username = Set((!username.is_empty()).then_some(username));
    }
    if let Some(display_name) = input.display_name {
        let display_name = display_name.trim().to_string();
        active.display_name = Set((!display_name.is_empty()).then_some(display_name));
    }
    if let Some(role) = input.role {
        active.role = Set(role);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

/// Delete a user by ID.
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    users::Entity::delete_by_id(id).exec(db).await
}
