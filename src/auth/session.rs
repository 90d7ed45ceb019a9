//! The one place a request's identity is turned into a typed session.
//!
//! Handlers never look at raw claims: they receive a [`Session`] through the
//! [`AuthenticatedUser`](super::middleware::AuthenticatedUser) extractor.

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::models::users::{self, Roles};

/// Who is calling, with which role, until when.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub user_id: Uuid,
    /// Taken from the stored user, not from the token.
    pub role: Roles,
    pub username: Option<String>,
    pub expiry: DateTime<Utc>,
}

impl Session {
    pub fn new(user: &users::Model, claims: &Claims) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            username: user.username.clone().or_else(|| claims.username.clone()),
            expiry: claims.expiry(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Roles::Admin
    }
}

/// Short-lived in-process cache of user rows, so a burst of requests with the
/// same token does not hit the database each time.
#[derive(Clone)]
pub struct SessionCache {
    users: Cache<Uuid, users::Model>,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            users: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(10_000)
                .build(),
        }
    }

    pub async fn get(&self, user_id: &Uuid) -> Option<users::Model> {
        self.users.get(user_id).await
    }

    pub async fn insert(&self, user: users::Model) {
        self.users.insert(user.id, user).await;
    }

    /// Drop a cached user after their row changed.
    pub async fn invalidate(&self, user_id: &Uuid) {
        self.users.invalidate(user_id).await;
    }
}
