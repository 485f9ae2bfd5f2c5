use std::fs;
use std::path::PathBuf;

use speedup_surfaces::config::{LoggingConfig, OutputConfig, PlotsConfig, WindowConfig};

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "speedup_surfaces_config_restore_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn assert_close(a: f32, b: f32, label: &str) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-6, "{label} mismatch: {a} vs {b}");
}

fn assert_config_eq(actual: &PlotsConfig, expected: &PlotsConfig) {
    assert_eq!(actual.output.dir, expected.output.dir);
    assert_eq!(actual.output.width, expected.output.width);
    assert_eq!(actual.output.height, expected.output.height);
    assert_close(actual.window.width, expected.window.width, "window.width");
    assert_close(actual.window.height, expected.window.height, "window.height");
    assert_close(
        actual.window.drag_sensitivity,
        expected.window.drag_sensitivity,
        "window.drag_sensitivity",
    );
    assert_eq!(actual.logging.level, expected.logging.level);
}

#[test]
fn config_roundtrip_default_toml() {
    let default_cfg = PlotsConfig::default();
    let text = toml::to_string_pretty(&default_cfg).expect("serialize default");
    let parsed: PlotsConfig = toml::from_str(&text).expect("parse default");
    assert_config_eq(&parsed, &default_cfg);
}

#[test]
fn config_load_custom_values() {
    let path = unique_path("custom.toml");
    let path_str = path.to_string_lossy().to_string();
    let custom = PlotsConfig {
        output: OutputConfig {
            dir: "figures/out".to_string(),
            width: 800,
            height: 600,
        },
        window: WindowConfig {
            width: 1280.0,
            height: 720.0,
            drag_sensitivity: 0.25,
        },
        logging: LoggingConfig {
            level: "speedup_surfaces=debug".to_string(),
        },
    };
    let text = toml::to_string_pretty(&custom).expect("serialize custom");
    fs::write(&path, text).expect("write custom config");

    let loaded = PlotsConfig::load_or_default(&path_str);
    assert_config_eq(&loaded, &custom);

    let _ = fs::remove_file(&path);
}

#[test]
fn config_missing_file_fallback() {
    let path = unique_path("missing.toml");
    let path_str = path.to_string_lossy().to_string();
    let _ = fs::remove_file(&path);

    let loaded = PlotsConfig::load_or_default(&path_str);
    let defaults = PlotsConfig::default();
    assert!(path.exists(), "missing config should be created");
    assert_config_eq(&loaded, &defaults);

    // A second load reads the commented template back to the same values.
    let reloaded = PlotsConfig::load_or_default(&path_str);
    assert_config_eq(&reloaded, &defaults);

    let _ = fs::remove_file(&path);
}
