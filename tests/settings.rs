use std::io::Write;

use cryptogate::config::{
    load_settings, ENV_AES_IV, ENV_AES_KEY, ENV_LISTEN, ENV_LOG_PAYLOADS,
};
use cryptogate_cipher::{CryptoDirection, CryptoMethod};
use serial_test::serial;

const CONFIG: &str = r#"
listen: 0.0.0.0:9000
log_payloads: false
aes:
  key: 0123456789abcdef
  iv: fedcba9876543210
routes:
  - when:
      http:
        method: GET
        path_glob: /v1/profile
    crypto:
      method: AES
      direction: ENCRYPT
"#;

fn clear_env() {
    for key in [ENV_LISTEN, ENV_LOG_PAYLOADS, ENV_AES_KEY, ENV_AES_IV] {
        std::env::remove_var(key);
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
#[serial]
async fn loads_yaml_routes_and_defaults() {
    clear_env();
    let file = write_config(CONFIG);

    let loaded = load_settings(Some(file.path())).await.unwrap();
    assert!(loaded.found);
    let settings = loaded.settings;
    assert_eq!(settings.listen.port(), 9000);
    assert_eq!(settings.log_level, "info");

    let table = settings.route_table();
    let meta = table.lookup("GET", None, "/v1/profile").unwrap();
    assert_eq!(meta.method, CryptoMethod::Aes);
    assert_eq!(meta.direction, CryptoDirection::Encrypt);
    assert!(settings.engine_defaults().aes.is_some());
}

#[tokio::test]
#[serial]
async fn missing_file_falls_back_to_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_settings(Some(&dir.path().join("absent.yaml")))
        .await
        .unwrap();
    assert!(!loaded.found);
    assert_eq!(loaded.settings.listen.to_string(), "127.0.0.1:8788");
}

#[tokio::test]
#[serial]
async fn environment_overrides_file_values() {
    clear_env();
    let file = write_config(CONFIG);
    std::env::set_var(ENV_LISTEN, "127.0.0.1:7000");
    std::env::set_var(ENV_LOG_PAYLOADS, "true");
    std::env::set_var(ENV_AES_KEY, "abcdefghijklmnopqrstuvwxyz012345");

    let settings = load_settings(Some(file.path())).await.unwrap().settings;
    clear_env();

    assert_eq!(settings.listen.port(), 7000);
    assert!(settings.log_payloads);
    let aes = settings.aes.unwrap();
    assert_eq!(aes.key.len(), 32);
    assert_eq!(aes.iv, "fedcba9876543210");
}

#[tokio::test]
#[serial]
async fn invalid_env_key_fails_validation() {
    clear_env();
    let file = write_config(CONFIG);
    std::env::set_var(ENV_AES_KEY, "too-short");

    let result = load_settings(Some(file.path())).await;
    clear_env();

    let err = result.err().unwrap();
    let settings_err = err.downcast_ref::<cryptogate::SettingsError>().unwrap();
    assert_eq!(settings_err.0.code.0, "CONFIG.INVALID");
}
