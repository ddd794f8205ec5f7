//! Authenticated identity plumbing.
//!
//! Credential validation is an external collaborator: an outer
//! middleware resolves the caller's credentials and injects an
//! [`Identity`] request extension. The board routes only require that
//! the extension is present.

use super::ApiError;
use crate::board::domain::UserId;
use axum::Extension;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// The authenticated caller's stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
}

impl Identity {
    /// Creates an identity for the given user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.user_id
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Builds the request-extension layer an auth middleware (or a test)
/// uses to stamp every request with a resolved identity.
#[must_use]
pub fn identity_extension(user_id: UserId) -> Extension<Identity> {
    Extension(Identity::new(user_id))
}
