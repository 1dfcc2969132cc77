//! Integration tests for configuration loading and the local scheduler
//! service behind the preferences page.

use std::fs;
use std::sync::Arc;

use hourglass_config::{Config, ServiceConfig};
use hourglass_protocol::{ItemId, Message, ScheduleState, SchedulerConfig, Weekday};
use hourglass_service::{ConfigService, ForcedStateService, LocalService, StaticSelection};
use hourglass_tui::App;
use tempfile::TempDir;

#[tokio::test]
async fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("hourglass.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Configuration for hourglass
            service: { state_dir: "/var/lib/hourglass" },
            selection: ["4f3c", "9d81"],
            logging: { filter: "hourglass=debug" },
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(
        config.service.resolve_state_dir().unwrap(),
        std::path::PathBuf::from("/var/lib/hourglass")
    );
    assert_eq!(config.selection, vec!["4f3c", "9d81"]);
    assert_eq!(config.logging.filter, "hourglass=debug");
    assert_eq!(config.logging.file, std::path::PathBuf::from("hourglass.log"));
}

#[tokio::test]
async fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let original = Config {
        service: ServiceConfig::with_state_dir(dir.path().join("state")),
        selection: vec!["a1".to_string()],
        ..Default::default()
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    assert_eq!(original, loaded);
}

#[tokio::test]
async fn config_load_nonexistent_fails() {
    let result = Config::load_from("/nonexistent/path/config.json");
    assert!(result.is_err());
}

#[tokio::test]
async fn service_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let ids = [ItemId::from("a"), ItemId::from("b")];

    let mut record = SchedulerConfig {
        low_up: 40,
        ..Default::default()
    };
    record.button_state.set(Weekday::Sat, 22, ScheduleState::Paused);

    {
        let service = LocalService::open(dir.path().to_path_buf()).await.unwrap();
        service.set_config(record.clone()).await.unwrap();
        service.set_forced(&ids[..1], true).await.unwrap();
    }

    let service = LocalService::open(dir.path().to_path_buf()).await.unwrap();
    assert_eq!(service.get_config().await.unwrap(), record);
    assert_eq!(service.get_forced(&ids).await.unwrap(), vec![true, false]);

    // the schedule is stored hour-major
    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("scheduler.json")).unwrap())
            .unwrap();
    assert_eq!(stored["button_state"].as_array().unwrap().len(), 24);
    assert_eq!(stored["button_state"][22][5], 2);
    assert_eq!(stored["low_up"], 40);
}

#[tokio::test]
async fn page_edits_reach_the_service() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(LocalService::open(dir.path().to_path_buf()).await.unwrap());
    let selection = Arc::new(StaticSelection::from_strings(["x"]));
    let mut app = App::new(service.clone(), service.clone(), selection);

    app.show();
    app.settle().await;

    // download limit: "-1" -> "250"
    app.update(Message::SettingsEdit);
    app.update(Message::SettingsBackspace);
    app.update(Message::SettingsBackspace);
    for ch in "250".chars() {
        app.update(Message::SettingsInput { ch });
    }
    app.update(Message::SettingsConfirm);
    app.update(Message::Apply);
    app.update(Message::ToggleForceStart);
    app.settle().await;

    let record = service.get_config().await.unwrap();
    assert_eq!(record.low_down, 250);
    assert_eq!(
        service.get_forced(&[ItemId::from("x")]).await.unwrap(),
        vec![true]
    );
    assert!(!app.page().is_modified());
}
