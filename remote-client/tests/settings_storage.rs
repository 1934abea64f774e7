// remote-client/tests/settings_storage.rs

use remote_client::{ClientConfig, ClientError, RemoteSettings, SettingsStorage};
use tempfile::TempDir;

#[test]
fn test_settings_roundtrip_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let storage = SettingsStorage::new(temp_dir.path().join("remote").join("settings.json"));
    assert!(!storage.exists());

    storage
        .save(&RemoteSettings::new("Livingroom", "livingroom", "zone1"))
        .unwrap();
    assert!(storage.exists());

    let remote = storage.load_remote().unwrap();
    assert_eq!(remote.id(), "livingroom");
    assert_eq!(remote.home(), "zone1");

    storage.delete().unwrap();
    assert!(!storage.exists());
    assert!(storage.load().is_none());
}

#[test]
fn test_absent_settings_name_every_field() {
    let temp_dir = TempDir::new().unwrap();
    let storage = SettingsStorage::new(temp_dir.path().join("settings.json"));

    let err = storage.load_remote().unwrap_err();
    assert!(matches!(err, ClientError::MissingSettings(ref f) if f == &["name", "id", "home"]));
}

#[test]
fn test_partial_settings_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, r#"{"name":"Kitchen","id":"kitchen"}"#).unwrap();

    let err = SettingsStorage::new(&path).load_remote().unwrap_err();
    assert!(matches!(err, ClientError::MissingSettings(ref f) if f == &["home"]));
}

#[test]
fn test_unreadable_settings_count_as_absent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(SettingsStorage::new(&path).load().is_none());
}

#[test]
fn test_config_points_storage_at_settings_path() {
    let temp_dir = TempDir::new().unwrap();
    let config = ClientConfig::default().with_settings_path(temp_dir.path().join("s.json"));
    assert_eq!(config.settings_storage().path(), temp_dir.path().join("s.json"));
}
