//! Integration tests for the command-line host

use clap::Parser;
use parlance::{load_config, run, Args, CliError};
use parlance_common::test_utils::{create_temp_dir, fr_fr_mo, write_csv_catalog, FixtureEncoding, FR_FR_CSV};
use parlance_i18n::Registry;
use std::fs;

fn invoke(args: &[&str]) -> Result<String, CliError> {
    let args = Args::try_parse_from(std::iter::once("parlance").chain(args.iter().copied())).unwrap();
    let config = load_config(args.config.as_deref())?;
    let registry = Registry::new(&config.i18n)?;
    run(&registry, &args.command)
}

#[test]
fn test_translate_from_csv_config() {
    let dir = create_temp_dir();
    write_csv_catalog(dir.path(), "fr_FR", FR_FR_CSV, FixtureEncoding::Utf16LeBom).unwrap();
    let config_path = dir.path().join("parlance.toml");
    fs::write(
        &config_path,
        format!(
            "[i18n]\ntranslations_dir = {:?}\ncatalog_format = \"csv\"\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();
    let config = config_path.to_str().unwrap();

    assert_eq!(invoke(&["--config", config, "translate", "fr_FR", "school"]).unwrap(), "\u{e9}cole");
    assert_eq!(
        invoke(&[
            "--config", config, "translate", "fr-fr", "%(count)d school", "--plural",
            "%(count)d schools", "--count", "4",
        ])
        .unwrap(),
        "%(count)d \u{e9}coles"
    );
}

#[test]
fn test_three_column_csv_plural() {
    let dir = create_temp_dir();
    write_csv_catalog(dir.path(), "fr_FR", "school,\u{e9}cole\napple,pomme,pommes\n", FixtureEncoding::Utf8Bom)
        .unwrap();
    let config_path = dir.path().join("parlance.toml");
    fs::write(
        &config_path,
        format!(
            "[i18n]\ntranslations_dir = {:?}\ncatalog_format = \"csv\"\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();
    let config = config_path.to_str().unwrap();

    assert_eq!(invoke(&["--config", config, "translate", "fr_FR", "apple"]).unwrap(), "pomme");
    assert_eq!(
        invoke(&["translate", "fr_FR", "apple", "--plural", "apples", "--count", "2", "--config", config]).unwrap(),
        "pommes"
    );
}

#[test]
fn test_translate_from_gettext_config() {
    let dir = create_temp_dir();
    fr_fr_mo().write(dir.path(), "fr_FR", "shop").unwrap();
    let config_path = dir.path().join("parlance.toml");
    fs::write(
        &config_path,
        format!(
            "[i18n]\ntranslations_dir = {:?}\ncatalog_format = \"gettext\"\ndomain = \"shop\"\n\n[logging]\njson = true\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();
    let config = config_path.to_str().unwrap();

    assert_eq!(
        invoke(&["--config", config, "translate", "fr_FR", "club", "--context", "stick", "--plural", "clubs", "--count", "2"]).unwrap(),
        "les b\u{e2}tons"
    );
    assert_eq!(
        invoke(&["--config", config, "translate", "fr_FR", "right", "--context", "good"]).unwrap(),
        "le bien"
    );
}

#[test]
fn test_missing_config_file() {
    let dir = create_temp_dir();
    let missing = dir.path().join("absent.toml");
    let err = invoke(&["--config", missing.to_str().unwrap(), "locales"]).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}
