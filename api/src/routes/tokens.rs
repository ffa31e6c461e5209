//! Token issuance, verification and the authenticated echo endpoint

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use ck_core::errors::DomainError;
use ck_core::services::token::TokenService;
use ck_shared::errors::error_codes;
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::{IssueTokenRequest, TokenResponse, VerifyTokenRequest, VerifyTokenResponse};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, JwtAuth};

/// Registers `/tokens`, `/tokens/verify` and the protected `/me`
pub fn configure(cfg: &mut web::ServiceConfig, token_service: Arc<TokenService>) {
    cfg.route("/tokens", web::post().to(issue_tokens))
        .route("/tokens/verify", web::post().to(verify_token))
        .service(
            web::resource("/me")
                .wrap(JwtAuth::new(token_service))
                .route(web::get().to(me)),
        );
}

/// `POST /api/v1/tokens`
///
/// The body is optional; without a subject a random UUID is used. A body
/// that is present but not a valid request is rejected.
pub async fn issue_tokens(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request = parse_issue_request(&body)?;

    let subject = match request.subject {
        Some(subject) if subject.trim().is_empty() => {
            return Err(DomainError::Validation {
                message: "subject must not be empty".to_string(),
            }
            .into());
        }
        Some(subject) => subject,
        None => Uuid::new_v4().to_string(),
    };

    let pair = state.token_service.generate_tokens(&subject)?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: state.token_service.access_token_expires_in(),
    }))
}

fn parse_issue_request(body: &[u8]) -> Result<IssueTokenRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(IssueTokenRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest {
        code: error_codes::BAD_REQUEST,
        message: format!("Invalid request body: {}", e),
    })
}

/// `POST /api/v1/tokens/verify`
pub async fn verify_token(
    state: web::Data<AppState>,
    body: web::Json<VerifyTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let claims = state.token_service.verify(&body.token)?;

    Ok(HttpResponse::Ok().json(VerifyTokenResponse {
        valid: true,
        claims,
    }))
}

/// `GET /api/v1/me`
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(auth.claims)
}
