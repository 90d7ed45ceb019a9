use uuid::Uuid;

use crate::auth::session::Session;
use crate::error::ApiError;

pub fn require_admin(session: &Session) -> Result<(), ApiError> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".into()))
    }
}

/// Users may act on their own account; admins on any account.
pub fn require_self_or_admin(session: &Session, user_id: Uuid) -> Result<(), ApiError> {
    if session.user_id == user_id || session.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("You can only access your own account".into()))
    }
}

/// Refuse operations an admin must not perform on their own account.
pub fn forbid_self(session: &Session, user_id: Uuid, action: &str) -> Result<(), ApiError> {
    if session.user_id == user_id {
        Err(ApiError::Forbidden(format!("You cannot {action} your own account")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::Roles;

    fn session(role: Roles) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            role,
            username: None,
            expiry: chrono::Utc::now(),
        }
    }

    #[test]
    fn admin_check() {
        assert!(require_admin(&session(Roles::Admin)).is_ok());
        assert!(matches!(
            require_admin(&session(Roles::User)),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn self_or_admin() {
        let member = session(Roles::User);
        assert!(require_self_or_admin(&member, member.user_id).is_ok());
        assert!(require_self_or_admin(&member, Uuid::new_v4()).is_err());
        assert!(require_self_or_admin(&session(Roles::Admin), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn forbid_self_names_the_action() {
        let admin = session(Roles::Admin);
        let err = forbid_self(&admin, admin.user_id, "delete").unwrap_err();
        assert_eq!(err.to_string(), "You cannot delete your own account");
        assert!(forbid_self(&admin, Uuid::new_v4(), "delete").is_ok());
    }
}
