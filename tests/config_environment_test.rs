// ABOUTME: Unit tests for server configuration loaded from the environment
// ABOUTME: Validates defaults, overrides, invalid values and catalog snapshot loading
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use kinetic_generator::MovementCatalog;
use kinetic_server::config::ServerConfig;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const MANAGED_VARS: &[&str] = &[
    "HTTP_PORT",
    "HOST",
    "KINETIC_CATALOG_PATH",
    "KINETIC_SUGGEST_MINUTES",
    "KINETIC_MAX_STORED_PLANS",
    "CORS_ALLOWED_ORIGINS",
    "KINETIC_RECOVERY_CAP_THRESHOLD",
    "KINETIC_RECOVERY_SLEEP_WEIGHT",
    "KINETIC_DEFAULT_EQUIPMENT",
];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.suggest_minutes, 30);
    assert!(config.catalog_path.is_none());
    assert_eq!(config.cors_origins, "*");
}

#[test]
#[serial]
fn test_server_overrides() {
    clear_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("HOST", "0.0.0.0");
    env::set_var("KINETIC_SUGGEST_MINUTES", "45");
    env::set_var("KINETIC_MAX_STORED_PLANS", "250");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://app.example.com");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.bind_address(), "0.0.0.0:9090");
    assert_eq!(config.suggest_minutes, 45);
    assert_eq!(config.max_stored_plans, 250);
    assert_eq!(config.cors_origins, "https://app.example.com");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");

    let result = ServerConfig::from_env();

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("HTTP_PORT"));

    clear_env();
}

#[test]
#[serial]
fn test_generator_overrides_flow_through() {
    clear_env();
    env::set_var("KINETIC_RECOVERY_CAP_THRESHOLD", "70");
    env::set_var("KINETIC_DEFAULT_EQUIPMENT", "Dumbbell, bodyweight");

    let config = ServerConfig::from_env().unwrap();

    assert!((config.generator.recovery.cap_threshold - 70.0).abs() < f64::EPSILON);
    assert_eq!(
        config.generator.default_equipment,
        vec!["dumbbell".to_owned(), "bodyweight".to_owned()]
    );
    assert!(config.summary().contains("Recovery Cap Threshold: 70"));

    clear_env();
}

#[test]
#[serial]
fn test_unbalanced_recovery_weights_are_rejected() {
    clear_env();
    env::set_var("KINETIC_RECOVERY_SLEEP_WEIGHT", "0.9");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_zero_plan_store_limit_is_rejected() {
    clear_env();
    env::set_var("KINETIC_MAX_STORED_PLANS", "0");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_non_finite_recovery_weight_is_rejected() {
    clear_env();
    env::set_var("KINETIC_RECOVERY_SLEEP_WEIGHT", "NaN");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_catalog_snapshot_replaces_builtin() {
    clear_env();
    let builtin = MovementCatalog::builtin();
    let subset: Vec<_> = builtin.iter().take(12).cloned().collect();
    let path: PathBuf = env::temp_dir().join(format!("kinetic-catalog-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, serde_json::to_string(&subset).unwrap()).unwrap();

    let config = ServerConfig {
        catalog_path: Some(path.clone()),
        ..ServerConfig::default()
    };
    let catalog = config.load_catalog().unwrap();
    assert_eq!(catalog.len(), 12);
    assert!(config.summary().contains(&path.display().to_string()));

    std::fs::remove_file(&path).unwrap();
}

#[test]
#[serial]
fn test_missing_or_malformed_catalog_snapshot_fails() {
    let missing = ServerConfig {
        catalog_path: Some(env::temp_dir().join("kinetic-catalog-does-not-exist.json")),
        ..ServerConfig::default()
    };
    assert!(missing.load_catalog().is_err());

    let path = env::temp_dir().join(format!("kinetic-catalog-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, "{ not json").unwrap();
    let malformed = ServerConfig {
        catalog_path: Some(path.clone()),
        ..ServerConfig::default()
    };
    assert!(malformed.load_catalog().is_err());

    std::fs::remove_file(&path).unwrap();
}
