//! Tests for token issuance and the verification pipeline

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use serde_json::json;

use super::super::jws;
use super::super::*;
use super::{other_keypair, primary_keypair, NOW};
use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

const ISSUER: &str = "test";
const AUDIENCE: &str = "test";

fn claims() -> Claims {
    Claims::new(ISSUER, AUDIENCE, NOW + 3600)
        .with_not_before(NOW)
        .with_issued_at(NOW)
        .with_subject("user-42")
        .with_jwt_id("a1b2")
}

fn verify(token: &str) -> Result<Claims, TokenError> {
    verify_token_at(token, primary_keypair().public_key(), ISSUER, AUDIENCE, NOW)
}

fn segment(value: &serde_json::Value) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
}

#[test]
fn test_token_has_es512_header() {
    let token = issue_token(primary_keypair(), &claims()).unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);

    let header: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[0]).unwrap()).unwrap();
    assert_eq!(header, json!({"alg": "ES512", "typ": "JWT"}));

    // r || s, 66 bytes each
    assert_eq!(URL_SAFE_NO_PAD.decode(parts[2]).unwrap().len(), 132);
}

#[test]
fn test_valid_token_returns_claims() {
    let original = claims().with_claim("role", "admin");
    let token = issue_token(primary_keypair(), &original).unwrap();

    let verified = verify(&token).unwrap();
    assert_eq!(verified, original);
    assert_eq!(verified.claim("role"), Some(&json!("admin")));
}

#[test]
fn test_token_pair_is_distinct_and_both_verify() {
    let pair = issue_token_pair(primary_keypair(), &claims()).unwrap();

    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(verify(&pair.access_token).unwrap(), claims());
    assert_eq!(verify(&pair.refresh_token).unwrap(), claims());
}

#[test]
fn test_not_yet_valid() {
    let token = issue_token(
        primary_keypair(),
        &Claims::new(ISSUER, AUDIENCE, NOW + 7200).with_not_before(NOW + 3600),
    )
    .unwrap();

    assert_eq!(
        verify(&token),
        Err(TokenError::TokenNotYetValid { not_before: NOW + 3600 })
    );
}

#[test]
fn test_expired() {
    let token =
        issue_token(primary_keypair(), &Claims::new(ISSUER, AUDIENCE, NOW - 86400)).unwrap();

    assert_eq!(
        verify(&token),
        Err(TokenError::TokenExpired { expired_at: NOW - 86400 })
    );
}

#[test]
fn test_boundaries_have_no_leeway() {
    let token = issue_token(
        primary_keypair(),
        &Claims::new(ISSUER, AUDIENCE, NOW + 10).with_not_before(NOW),
    )
    .unwrap();
    let key = primary_keypair().public_key();

    assert!(verify_token_at(&token, key, ISSUER, AUDIENCE, NOW).is_ok());
    assert!(verify_token_at(&token, key, ISSUER, AUDIENCE, NOW + 10).is_ok());
    assert!(matches!(
        verify_token_at(&token, key, ISSUER, AUDIENCE, NOW - 1),
        Err(TokenError::TokenNotYetValid { .. })
    ));
    assert!(matches!(
        verify_token_at(&token, key, ISSUER, AUDIENCE, NOW + 11),
        Err(TokenError::TokenExpired { .. })
    ));
}

#[test]
fn test_wrong_public_key_is_signature_error() {
    // Even an expired token reports the signature failure first
    let token = issue_token(primary_keypair(), &Claims::new(ISSUER, AUDIENCE, NOW - 10)).unwrap();

    let result = verify_token_at(&token, other_keypair().public_key(), ISSUER, AUDIENCE, NOW);
    assert_eq!(result, Err(TokenError::SignatureInvalid));
}

#[test]
fn test_tampered_payload_is_signature_error() {
    let token = issue_token(primary_keypair(), &claims()).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let forged = segment(&json!({"iss": ISSUER, "aud": AUDIENCE, "exp": NOW + 999_999}));
    let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

    assert_eq!(verify(&tampered), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_non_ecdsa_algorithm_rejected_first() {
    let token = issue_token(primary_keypair(), &claims()).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    for alg in ["HS256", "RS256", "none"] {
        let header = segment(&json!({"alg": alg, "typ": "JWT"}));
        let swapped = format!("{}.{}.{}", header, parts[1], parts[2]);
        assert_eq!(
            verify(&swapped),
            Err(TokenError::AlgorithmMismatch { algorithm: alg.to_string() })
        );
    }
}

#[test]
fn test_other_ecdsa_algorithm_fails_signature() {
    let token = issue_token(primary_keypair(), &claims()).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let header = segment(&json!({"alg": "ES256"}));
    let swapped = format!("{}.{}.{}", header, parts[1], parts[2]);
    assert_eq!(verify(&swapped), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_non_object_claims() {
    for payload in [json!([1, 2, 3]), json!("claims"), json!(42)] {
        let token = jws::sign(primary_keypair(), &payload).unwrap();
        assert_eq!(verify(&token), Err(TokenError::ClaimsType));
    }
}

#[test]
fn test_issuer_and_audience_mismatch() {
    let token = issue_token(primary_keypair(), &claims()).unwrap();
    let key = primary_keypair().public_key();

    assert_eq!(
        verify_token_at(&token, key, "other", AUDIENCE, NOW),
        Err(TokenError::IssuerMismatch { found: ISSUER.to_string() })
    );
    assert_eq!(
        verify_token_at(&token, key, ISSUER, "other", NOW),
        Err(TokenError::AudienceMismatch { found: AUDIENCE.to_string() })
    );

    // Non-string audience never matches
    let token = jws::sign(
        primary_keypair(),
        &json!({"iss": ISSUER, "aud": [AUDIENCE], "exp": NOW + 60}),
    )
    .unwrap();
    assert!(matches!(verify(&token), Err(TokenError::AudienceMismatch { .. })));

    // Issuer is checked before audience
    let token = jws::sign(primary_keypair(), &json!({"exp": NOW + 60})).unwrap();
    assert_eq!(
        verify(&token),
        Err(TokenError::IssuerMismatch { found: "<missing>".to_string() })
    );
}

#[test]
fn test_missing_or_non_numeric_expiration() {
    let payloads = [
        json!({"iss": ISSUER, "aud": AUDIENCE}),
        json!({"iss": ISSUER, "aud": AUDIENCE, "exp": "tomorrow"}),
        json!({"iss": ISSUER, "aud": AUDIENCE, "exp": null}),
    ];

    for payload in payloads {
        let token = jws::sign(primary_keypair(), &payload).unwrap();
        assert_eq!(verify(&token), Err(TokenError::MissingExpiration));
    }
}

#[test]
fn test_numeric_claims_accept_floats() {
    let token = jws::sign(
        primary_keypair(),
        &json!({"iss": ISSUER, "aud": AUDIENCE, "exp": (NOW + 60) as f64 + 0.9, "nbf": NOW as f64}),
    )
    .unwrap();

    let verified = verify(&token).unwrap();
    assert_eq!(verified.exp, NOW + 60);
    assert_eq!(verified.nbf, Some(NOW));
}

#[test]
fn test_non_numeric_nbf_is_ignored() {
    let token = jws::sign(
        primary_keypair(),
        &json!({"iss": ISSUER, "aud": AUDIENCE, "exp": NOW + 60, "nbf": "later"}),
    )
    .unwrap();

    let verified = verify(&token).unwrap();
    assert_eq!(verified.nbf, None);
    assert_eq!(verified.claim("nbf"), Some(&json!("later")));
}

#[test]
fn test_malformed_tokens() {
    let cases = ["", "abc", "a.b", "a.b.c.d", ".payload.sig", "!!!.payload.sig"];

    for token in cases {
        assert!(
            matches!(verify(token), Err(TokenError::Malformed { .. })),
            "expected Malformed for {:?}",
            token
        );
    }
}

#[test]
fn test_service_generates_verifiable_pair() {
    let keypair = generate_keypair().unwrap();
    let service = TokenService::new(
        keypair,
        TokenServiceConfig::default()
            .with_issuer("svc")
            .with_audience("svc-api")
            .with_access_token_ttl(Duration::minutes(5))
            .with_refresh_token_ttl(Duration::days(1)),
    );

    let pair = service.generate_tokens("user-7").unwrap();
    let access = service.verify(&pair.access_token).unwrap();
    let refresh = service.verify(&pair.refresh_token).unwrap();

    let now = Utc::now().timestamp();
    assert_eq!(access.sub.as_deref(), Some("user-7"));
    assert_eq!(access.iss, "svc");
    assert_eq!(access.aud, "svc-api");
    assert!(access.exp - now <= 300 && access.exp - now >= 298);
    assert!(refresh.exp - now <= 86400 && refresh.exp - now >= 86398);
    assert_ne!(access.jti, refresh.jti);
    assert_eq!(service.access_token_expires_in(), 300);

    // Tokens from another issuer configuration are rejected
    let foreign = issue_token(
        primary_keypair(),
        &Claims::new("svc", "svc-api", now + 60),
    )
    .unwrap();
    assert_eq!(service.verify(&foreign), Err(TokenError::SignatureInvalid));
}
