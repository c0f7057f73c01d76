//! Integration tests for configuration loading through the public API.
//!
//! These tests verify the `ConfigLoader` builder chain the CLI uses, plus the
//! exported search-file helpers.

use splunk_search_config::{
    AuthStrategy, ConfigError, ConfigLoader, env_var_or_none, read_search_file, resolve_query,
};
use std::path::PathBuf;
use tempfile::TempDir;

/// Command-line values take precedence over the credentials file.
#[test]
fn test_config_loader_cli_overrides_rc() {
    let temp = TempDir::new().unwrap();
    let rc = temp.path().join(".splunkrc");
    std::fs::write(&rc, "host=rc-host\nusername=rc-user\npassword=rc-pass\n").unwrap();

    let config = ConfigLoader::new()
        .with_rc_path(rc)
        .from_splunkrc()
        .unwrap()
        .with_base_url("https://cli-override.com:8089".to_string())
        .with_api_token("cli-token".to_string())
        .build()
        .expect("should build with CLI overrides");

    assert_eq!(config.connection.base_url, "https://cli-override.com:8089");
    assert!(matches!(
        config.auth.strategy,
        AuthStrategy::ApiToken { .. }
    ));
}

#[test]
fn test_env_var_or_none_exported() {
    let _result: Option<String> = env_var_or_none("SPLUNK_BASE_URL");
}

#[test]
fn test_missing_explicit_rc_file_reports_path() {
    let path = PathBuf::from("/nonexistent/path/.splunkrc");
    let err = ConfigLoader::new()
        .with_rc_path(path.clone())
        .from_splunkrc()
        .err()
        .expect("missing explicit file should fail");

    assert!(err.is_file_error());
    assert!(err.to_string().contains("/nonexistent/path/.splunkrc"));
}

#[test]
fn test_search_file_roundtrip_through_resolve() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("errors.spl");
    std::fs::write(&path, "#header\nindex=main sourcetype=app\n| head 10\n").unwrap();

    assert_eq!(
        read_search_file(&path).unwrap(),
        "index=main sourcetype=app| head 10"
    );
    assert_eq!(
        resolve_query(Some("ignored"), Some(&path)).unwrap(),
        "index=main sourcetype=app| head 10"
    );
}

#[test]
fn test_missing_query_message_names_flag() {
    let err = resolve_query(None, None).unwrap_err();
    assert!(matches!(err, ConfigError::MissingQuery));
    assert!(err.to_string().contains("--search"));
}
