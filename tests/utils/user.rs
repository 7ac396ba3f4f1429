use super::setup::JWT_SECRET;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use sql_practice_backend::Claims;

pub trait UserLike {
    fn access_token(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub access_token: String,
}

impl User {
    pub(super) fn new(id: i32, access_token: String) -> Self {
        User { id, access_token }
    }
}

impl UserLike for User {
    fn access_token(&self) -> &str {
        &self.access_token
    }
}

/// Signs a token the way the auth service would.
pub fn mint_token(user_id: i32, permissions: &[&str]) -> String {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: now,
        permissions: permissions.iter().map(|p| (*p).to_owned()).collect(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign token")
}
