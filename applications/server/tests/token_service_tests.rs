/// Token service tests - signing, verification and rejection paths
mod common;

use chrono::Duration;
use common::TEST_SECRET;
use ebazar_server::services::TokenService;

fn service() -> TokenService {
    TokenService::new(TEST_SECRET.to_string(), 1)
}

#[test]
fn round_trip_preserves_subject() {
    let tokens = service();

    let token = tokens.issue("customer@example.com").unwrap();
    let claims = tokens.verify(&token).unwrap();

    assert_eq!(claims.email, "customer@example.com");
    assert!(claims.exp > claims.iat);
}

#[test]
fn token_signed_with_another_secret_is_rejected() {
    let tokens = service();
    let other = TokenService::new("some-other-secret".to_string(), 1);

    let token = other.issue("customer@example.com").unwrap();
    assert!(tokens.verify(&token).is_err());
}

#[test]
fn truncated_token_is_rejected() {
    let tokens = service();

    let token = tokens.issue("customer@example.com").unwrap();
    let truncated = &token[..token.len() - 10];

    assert!(tokens.verify(truncated).is_err());
}

#[test]
fn garbage_and_empty_input_are_rejected() {
    let tokens = service();

    assert!(tokens.verify("").is_err());
    assert!(tokens.verify("not-a-token").is_err());
    assert!(tokens.verify("a.b.c").is_err());
}

#[test]
fn expired_token_is_rejected() {
    let tokens = service();

    // Two minutes in the past, well beyond the default 60s leeway
    let token = tokens
        .issue_with_validity("customer@example.com", Duration::minutes(-2))
        .unwrap();

    assert!(tokens.verify(&token).is_err());
}
