use crate::{
    error::{self, Error},
    jwt::Claims,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::ops::Deref;

/// Id of the authenticated user, taken from the token subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserID(i32);

impl UserID {
    pub fn parse_str(string: &str) -> error::Result<Self> {
        let Ok(user_id) = string.parse::<i32>() else {
            warn!(subject = string, "token subject is not a user id");
            return Err(error::COULD_NOT_GET_CLAIMS);
        };

        Ok(UserID(user_id))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserID
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(claims) = parts.extensions.get::<Claims>() else {
            return Err(error::COULD_NOT_GET_CLAIMS);
        };

        UserID::parse_str(&claims.sub)
    }
}

impl Deref for UserID {
    type Target = i32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_subjects() {
        assert_eq!(*UserID::parse_str("17").unwrap(), 17);
        assert_eq!(
            UserID::parse_str("UserID-17").unwrap_err(),
            error::COULD_NOT_GET_CLAIMS
        );
    }
}
