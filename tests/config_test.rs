//! Configuration loading tests
//!
//! Tests that catalog configuration loads from disk and round-trips
//! through save/load.

use std::fs;
use voxcat::config::Config;
use voxcat::{Locale, RegistrationMode};

#[test]
fn test_config_written_on_first_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voxcat.cfg");

    let config = Config::load_from(&path).expect("Failed to load config");
    assert_eq!(config.path(), path.as_path());

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[catalog]"));
    assert!(written.contains("registration_mode"));
}

#[test]
fn test_config_reads_catalog_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voxcat.cfg");
    fs::write(
        &path,
        "[catalog]\n\
         max_voices = 3\n\
         registration_mode = all\n\
         voxdir = /opt/flite/voices\n\
         default_locale = en-GB-female\n\
         languages = en, fr ,\n",
    )
    .unwrap();

    let config = Config::load_from(&path).expect("Failed to load config");
    assert_eq!(config.max_voices(), 3);
    assert_eq!(config.registration_mode(), RegistrationMode::Eager);
    assert_eq!(config.voxdir().to_str(), Some("/opt/flite/voices"));
    assert_eq!(
        config.default_locale(),
        Some(Locale::new("en", "GB", "female"))
    );
    assert_eq!(config.languages(), vec!["en".to_string(), "fr".to_string()]);
}

#[test]
fn test_config_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voxcat.cfg");

    let mut config = Config::load_from(&path).unwrap();
    config.set("catalog", "max_voices", "5");
    config.set("catalog", "registration_mode", "single");
    config.save().unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.max_voices(), 5);
    assert_eq!(reloaded.registration_mode(), RegistrationMode::Single);
}
