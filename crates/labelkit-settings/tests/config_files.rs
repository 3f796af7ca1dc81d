use labelkit_core::SizePreset;
use labelkit_settings::{Config, SettingsError};
use std::path::PathBuf;
use tempfile::TempDir;

fn customized(dir: &TempDir) -> Config {
    let mut config = Config::new();
    config.templates.storage_path = Some(dir.path().join("shop_templates.json"));
    config.print.auto_print = false;
    config.print.output_directory = dir.path().join("prints");
    config.print.page_title = "Shelf Label".to_string();
    config.designer.default_preset = SizePreset::Small;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let config = customized(&dir);

    config.save_to_file(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[print]"));
    assert!(content.contains("default_preset = \"small\""));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = customized(&dir);

    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.templates.resolved_path(), dir.path().join("shop_templates.json"));
    assert!(!loaded.print.auto_print);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[print]\npage_title = \"\"\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));

    std::fs::write(&path, "[print\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_invalid_config_not_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let mut config = Config::new();
    config.print.output_directory = PathBuf::new();
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}
