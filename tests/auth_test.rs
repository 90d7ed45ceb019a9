//! Integration test for JWT session decoding.
//!
//! This test mints a JWT locally using the same HS256 secret that the server
//! would use, then validates it through the `validate_token` function.
//! No running server or database is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use portfolio_admin::auth::jwt::{Claims, validate_token};
use portfolio_admin::auth::session::Session;
use portfolio_admin::models::users::{self, Roles};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn claims_for(sub: &str, email: &str, exp: usize) -> Claims {
    Claims {
        sub: sub.to_string(),
        exp,
        iat: Some(Utc::now().timestamp() as usize),
        iss: Some("https://auth.example.com".to_string()),
        email: Some(email.to_string()),
        username: Some("alice".to_string()),
        name: Some("Alice Smith".to_string()),
    }
}

fn mint(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

#[test]
fn test_valid_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let exp = Utc::now().timestamp() as usize + 3600;
    let token = mint(
        &claims_for(&user_id.to_string(), "alice@example.com", exp),
        TEST_SECRET,
    );

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.user_email().unwrap(), "alice@example.com");
    assert_eq!(claims.display_name().unwrap(), "Alice Smith");
    assert_eq!(claims.expiry().timestamp() as usize, exp);
}

#[test]
fn test_session_contract_from_decoded_token() {
    let user_id = Uuid::new_v4();
    let exp = Utc::now().timestamp() as usize + 600;
    let token = mint(
        &claims_for(&user_id.to_string(), "alice@example.com", exp),
        TEST_SECRET,
    );
    let claims = validate_token(&token, TEST_SECRET).unwrap();

    let user = users::Model {
        id: user_id,
        email: "alice@example.com".to_string(),
        username: None,
        display_name: Some("Alice Smith".to_string()),
        role: Roles::Admin,
        created_at: Utc::now(),
        updated_at: None,
    };
    let session = Session::new(&user, &claims);

    assert_eq!(session.user_id, user_id);
    assert_eq!(session.role, Roles::Admin);
    assert_eq!(session.username.as_deref(), Some("alice"));
    assert_eq!(session.expiry.timestamp() as usize, exp);

    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["role"], "admin");
    assert_eq!(json["user_id"], user_id.to_string());
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;
    // Expired 5 minutes ago, well past the 60s default leeway.
    let token = mint(
        &claims_for(&Uuid::new_v4().to_string(), "old@example.com", now - 300),
        TEST_SECRET,
    );

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let exp = Utc::now().timestamp() as usize + 3600;
    let token = mint(
        &claims_for(&Uuid::new_v4().to_string(), "bob@example.com", exp),
        TEST_SECRET,
    );

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_claims_helpers_with_missing_fields() {
    let claims = Claims {
        sub: "not-a-uuid".to_string(),
        exp: 0,
        iat: None,
        iss: None,
        email: Some("   ".to_string()),
        username: None,
        name: None,
    };

    assert!(claims.user_id().is_err());
    assert!(claims.user_email().is_none());
    assert!(claims.display_name().is_none());
}
