// crates/server/src/auth.rs
//! Admin gate for the audit page.
//!
//! A request is an admin request when it carries
//! `Authorization: Bearer <token>` matching the configured admin token.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use options_audit_core::AccessControl;
use sha2::{Digest, Sha256};

use crate::state::AppState;

/// The caller of the current request, as seen by the access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminCaller {
    authorized: bool,
}

impl AdminCaller {
    pub fn from_headers(headers: &HeaderMap, admin_token: Option<&str>) -> Self {
        let Some(expected) = admin_token else {
            return Self { authorized: false };
        };
        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);

        Self {
            authorized: presented.is_some_and(|token| tokens_match(token, expected)),
        }
    }
}

impl AccessControl for AdminCaller {
    fn is_admin(&self) -> bool {
        self.authorized
    }
}

impl FromRequestParts<Arc<AppState>> for AdminCaller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, state.admin_token.as_deref()))
    }
}

/// Compare fixed-length digests so the comparison time does not depend on
/// where the tokens first differ.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
