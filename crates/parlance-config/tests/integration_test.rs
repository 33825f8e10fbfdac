//! Integration tests for configuration loading from disk.

use parlance_common::test_utils::{create_temp_dir, init_test_logging};
use parlance_config::{CatalogFormat, ConfigError, ConfigLoader};
use std::fs;

#[test]
fn test_load_from_file() {
    init_test_logging();
    let dir = create_temp_dir();
    let path = dir.path().join("parlance.toml");
    fs::write(
        &path,
        "[i18n]\ntranslations_dir = \"translations\"\ncatalog_format = \"csv\"\ndefault_locale = \"es-la\"\n",
    )
    .unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    assert_eq!(config.i18n.catalog_format, CatalogFormat::Csv);
    assert_eq!(config.i18n.default_locale, "es-la");
    assert_eq!(config.i18n.domain, "messages");
}

#[test]
fn test_load_missing_file() {
    let dir = create_temp_dir();
    let loader = ConfigLoader::new(dir.path().join("absent.toml"));
    assert!(matches!(loader.load(), Err(ConfigError::Io { .. })));
}

#[test]
fn test_load_rejects_invalid_settings() {
    let dir = create_temp_dir();
    let path = dir.path().join("parlance.toml");
    fs::write(&path, "[i18n]\ncatalog_format = \"gettext\"\n").unwrap();

    // Only valid when PARLANCE_TRANSLATIONS_DIR happens to be set.
    if std::env::var("PARLANCE_TRANSLATIONS_DIR").is_err() {
        assert!(matches!(
            ConfigLoader::new(&path).load(),
            Err(ConfigError::Invalid(_))
        ));
    }
}
