//! Auth Middleware
//!
//! Applied once, above all routers. Read endpoints and the contact forms
//! are public; mutations require a valid token carrying the admin role.
//!
//! | Failure | Status |
//! |---------|--------|
//! | Missing Authorization header | 401 |
//! | Expired token | 401 |
//! | Invalid token | 401 |
//! | Valid token, non-admin role | 403 |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Whether the request mutates directory data and therefore needs an
/// admin token. Photo bytes are served under `/api/member/photo/` with
/// GET only, so the method check keeps that path public.
pub fn requires_admin(method: &Method, path: &str) -> bool {
    if *method == Method::POST {
        return path == "/api/member" || path == "/api/category" || path == "/api/tag";
    }
    if *method == Method::PUT || *method == Method::DELETE {
        return path.starts_with("/api/member/")
            || path.starts_with("/api/category/")
            || path.starts_with("/api/tag/");
    }
    false
}

pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight passes through
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !requires_admin(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "Request without authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            if !user.is_admin() {
                return Err(AppError::forbidden("Admin resource. Access denied"));
            }
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_need_admin() {
        assert!(requires_admin(&Method::POST, "/api/member"));
        assert!(requires_admin(&Method::PUT, "/api/member/acme-corp"));
        assert!(requires_admin(&Method::DELETE, "/api/category/tech"));
        assert!(requires_admin(&Method::DELETE, "/api/tag/rust"));
    }

    #[test]
    fn reads_and_forms_are_public() {
        assert!(!requires_admin(&Method::GET, "/api/members"));
        assert!(!requires_admin(&Method::GET, "/api/member/acme-corp"));
        assert!(!requires_admin(&Method::GET, "/api/member/photo/acme-corp"));
        assert!(!requires_admin(&Method::POST, "/api/contact"));
        assert!(!requires_admin(&Method::POST, "/api/members/related"));
        assert!(!requires_admin(&Method::GET, "/api/categories"));
    }
}
