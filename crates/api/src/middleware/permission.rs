//! Per-route permission gate.
//!
//! Each protected route is wrapped with its own gate carrying the permission
//! it requires:
//!
//! ```ignore
//! Router::new().route("/", guarded(get(list_movies), &state, GET_MOVIES))
//! ```
//!
//! The gate is a route layer, so it runs before the handler's extractors.
//! A request without a valid token or the required permission never reaches
//! body parsing or the store. On success the decoded [`Claims`] are inserted
//! into the request extensions for the handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;
use casting_core::error::AuthError;
use casting_core::permissions::check_permission;

use crate::auth::jwt::{Claims, TokenVerifier};
use crate::error::AppError;
use crate::state::AppState;

/// State for one gated route: the verifier and the permission it requires.
#[derive(Clone)]
pub struct PermissionGate {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

impl PermissionGate {
    pub fn new(verifier: Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self {
            verifier,
            permission,
        }
    }

    /// Verify the bearer token in `headers` and check the required permission.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = bearer_token(headers)?;
        let claims = self.verifier.verify(token)?;
        check_permission(claims.permissions(), self.permission)?;
        Ok(claims)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. Anything other than exactly two
/// space-separated parts is malformed.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| {
            AuthError::MalformedCredential("Authorization header is not valid text".into())
        })?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::MalformedCredential("Authorization header must start with \"Bearer\"".into()),
        ),
        (Some(_), None, _) => Err(AuthError::MalformedCredential("Token not found".into())),
        _ => Err(AuthError::MalformedCredential(
            "Authorization header must be bearer token".into(),
        )),
    }
}

/// Middleware body for [`guarded`] routes.
pub async fn permission_gate(
    State(gate): State<PermissionGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = match gate.authorize(request.headers()) {
        Ok(claims) => claims,
        Err(err) => {
            if err.is_forbidden() {
                tracing::warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    permission = gate.permission,
                    "Permission denied"
                );
            } else {
                tracing::debug!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    reason = %err,
                    "Rejected bearer credential"
                );
            }
            return Err(err.into());
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Wrap `route` so every request must carry `permission`.
pub fn guarded(
    route: MethodRouter<AppState>,
    state: &AppState,
    permission: &'static str,
) -> MethodRouter<AppState> {
    let gate = PermissionGate::new(Arc::clone(&state.verifier), permission);
    route.route_layer(middleware::from_fn_with_state(gate, permission_gate))
}
