//! `.splunkrc` parsing and precedence tests.

use secrecy::ExposeSecret;
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

use super::{cleared_splunk_env, env_lock};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::loader::splunkrc::parse_splunkrc;
use crate::types::AuthStrategy;

fn write_rc(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join(".splunkrc");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_parse_skips_comments_and_blank_lines() {
    let content = "# connection\n\nhost=splunk.local\n  port = 8090  \nversion=9.1\n";
    let pairs = parse_splunkrc(content, Path::new(".splunkrc")).unwrap();
    assert_eq!(
        pairs,
        vec![
            ("host".to_string(), "splunk.local".to_string()),
            ("port".to_string(), "8090".to_string()),
            ("version".to_string(), "9.1".to_string()),
        ]
    );
}

#[test]
fn test_parse_rejects_line_without_equals() {
    let result = parse_splunkrc("host=a\njunk\n", Path::new(".splunkrc"));
    assert!(matches!(result, Err(ConfigError::RcFileParse { line: 2, .. })));
}

#[test]
fn test_password_may_contain_equals() {
    let pairs = parse_splunkrc("password=a=b=c", Path::new(".splunkrc")).unwrap();
    assert_eq!(pairs[0].1, "a=b=c");
}

#[test]
#[serial]
fn test_rc_values_build_config() {
    let _lock = env_lock().lock().unwrap();
    let temp = TempDir::new().unwrap();
    let path = write_rc(
        temp.path(),
        "host=rc.example.com\nport=8090\nscheme=https\nusername=admin\npassword=s3cret\napp=None\n",
    );

    temp_env::with_vars(cleared_splunk_env(), || {
        let config = ConfigLoader::new()
            .with_rc_path(path.clone())
            .from_splunkrc()
            .unwrap()
            .from_env()
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, "https://rc.example.com:8090");
        assert_eq!(config.connection.app, None);
        match config.auth.strategy {
            AuthStrategy::SessionToken { username, password } => {
                assert_eq!(username, "admin");
                assert_eq!(password.expose_secret(), "s3cret");
            }
            AuthStrategy::ApiToken { .. } => panic!("expected session auth"),
        }
    });
}

#[test]
#[serial]
fn test_env_overrides_rc() {
    let _lock = env_lock().lock().unwrap();
    let temp = TempDir::new().unwrap();
    let path = write_rc(temp.path(), "host=rc.example.com\ntoken=rc-token\n");

    let mut vars = cleared_splunk_env();
    vars.retain(|(k, _)| *k != "SPLUNK_HOST");
    vars.push(("SPLUNK_HOST", Some("env.example.com")));

    temp_env::with_vars(vars, || {
        let config = ConfigLoader::new()
            .with_rc_path(path.clone())
            .from_splunkrc()
            .unwrap()
            .from_env()
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, "https://env.example.com:8089");
        assert!(matches!(config.auth.strategy, AuthStrategy::ApiToken { .. }));
    });
}

#[test]
fn test_missing_explicit_rc_is_error() {
    let temp = TempDir::new().unwrap();
    let result = ConfigLoader::new()
        .with_rc_path(temp.path().join("absent"))
        .from_splunkrc();
    match result {
        Err(err) => {
            assert!(matches!(err, ConfigError::RcFileRead { .. }));
            assert!(err.is_file_error());
        }
        Ok(_) => panic!("expected RcFileRead"),
    }
}

#[test]
fn test_bad_port_in_rc() {
    let temp = TempDir::new().unwrap();
    let path = write_rc(temp.path(), "port=abc\n");
    let result = ConfigLoader::new().with_rc_path(path).from_splunkrc();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
