use crate::cli::conf::{config_error_hint, validate};
use crate::conf::ConfigError;
use std::fs;

#[test]
fn valid_file_passes() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clicktrail.hcl");
    fs::write(&path, "cleaning {\n  domain = \"example.com\"\n}\n").unwrap();

    // Act
    let cfg = validate(&path).unwrap();

    // Assert
    assert_eq!(cfg.cleaning.domain.as_deref(), Some("example.com"));
}

#[test]
fn undeclared_host_skipping_needs_hostnames() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clicktrail.hcl");
    fs::write(
        &path,
        "log {\n  vhost_column = 10\n}\ncleaning {\n  skip_undeclared_hosts = true\n}\n",
    )
    .unwrap();

    // Act
    let err = validate(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::NoDeclaredHosts));
    assert!(config_error_hint(&err).unwrap().contains("host_aliases"));
}

#[test]
fn io_errors_have_no_hint() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let err = validate(&dir.path().join("missing.hcl")).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(config_error_hint(&err).is_none());
}
