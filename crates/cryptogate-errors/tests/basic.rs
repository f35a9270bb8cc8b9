use cryptogate_errors::prelude::*;
use serde_json::json;

#[test]
fn build_and_render_public() {
    let err = ErrorBuilder::new(codes::CRYPTO_DECRYPT)
        .dev_msg("bad decrypt")
        .meta_kv("method", json!("AES"))
        .correlation("req-123")
        .build();

    let public_view = err.to_public();
    assert_eq!(public_view.code, "CRYPTO.DECRYPT_FAILED");
    assert_eq!(public_view.message, "Unable to decrypt request payload.");
    assert_eq!(public_view.correlation_id.as_deref(), Some("req-123"));
    assert_eq!(err.http_status, 500);
    assert_eq!(err.retryable, RetryClass::Permanent);
    assert_eq!(err.kind, ErrorKind::Crypto);
}

#[test]
fn public_view_never_carries_dev_message() {
    let err = ErrorBuilder::new(codes::CRYPTO_ENCRYPT)
        .dev_msg("plaintext was {\"secret\":1}")
        .meta_kv("stage", json!("encrypt_response"))
        .build();

    let rendered = serde_json::to_string(&err.to_public()).unwrap();
    assert!(!rendered.contains("secret"));

    let audit = err.to_audit();
    assert_eq!(audit.kind, "Crypto");
    assert_eq!(audit.stage.as_deref(), Some("encrypt_response"));
    assert!(audit.message_dev.unwrap().contains("plaintext"));
}

#[test]
fn error_code_round_trips_through_json() {
    let err = ErrorBuilder::new(codes::CONFIG_INVALID).build();
    let raw = serde_json::to_value(&err).unwrap();
    assert_eq!(raw["code"], "CONFIG.INVALID");

    let back: ErrorObj = serde_json::from_value(raw).unwrap();
    assert_eq!(back.code, codes::CONFIG_INVALID);

    let unknown = json!({
        "code": "NOPE.NOPE",
        "kind": "Unknown",
        "message_user": "x",
        "http_status": 500,
        "retryable": "Permanent",
        "severity": "Error"
    });
    assert!(serde_json::from_value::<ErrorObj>(unknown).is_err());
}

#[test]
fn unregistered_code_falls_back_to_internal() {
    let err = ErrorBuilder::new(ErrorCode("NOT.REGISTERED")).build();
    assert_eq!(err.code, codes::UNKNOWN_INTERNAL);
    assert_eq!(err.retryable, RetryClass::Transient);
}
