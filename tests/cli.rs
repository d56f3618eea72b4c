#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Nothing listens on the discard port, so requests fail fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

fn menuboard_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("menuboard"));
    cmd.env("MENUBOARD_CONFIG_DIR", config_dir.path().as_os_str())
        .env_remove("MENUBOARD_API")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("categories"))
        .stdout(predicate::str::contains("browse"));
}

#[test]
fn test_price_range_is_validated_before_any_request() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["--api", UNREACHABLE_API])
        .args(["menus", "create", "--title", "Noodles", "--category", "c1"])
        .args(["--min-price", "9", "--max-price", "5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Max price must be greater than min price",
        ));
}

#[test]
fn test_promotion_must_be_below_regular_price() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["--api", UNREACHABLE_API])
        .args(["menus", "create", "--title", "Latte", "--category", "c1"])
        .args(["--regular-price", "8", "--promo-price", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Promotion price must be less than regular price",
        ));
}

#[test]
fn test_menu_title_is_required() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["--api", UNREACHABLE_API])
        .args(["menus", "create", "--category", "c1", "--price", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Title is required"));
}

#[test]
fn test_incomplete_price_range() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["--api", UNREACHABLE_API])
        .args(["menus", "create", "--title", "Soup", "--min-price", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Both --min-price and --max-price are required",
        ));
}

#[test]
fn test_category_name_is_required() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["--api", UNREACHABLE_API])
        .args(["categories", "create", "--description", "Hot drinks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Category name is required"));
}

#[test]
fn test_failed_load_reports_action() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["--api", UNREACHABLE_API, "categories", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Failed to load categories"));
}

#[test]
fn test_browse_shows_failure_state() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["--api", UNREACHABLE_API, "browse"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Failed to load menu. Please try refreshing the page.",
        ));
}

#[test]
fn test_config_set_and_get() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["config", "api-base", "http://menu.local/api/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api-base = http://menu.local/api"));

    assert!(temp.path().join("config.json").exists());
    let saved = fs::read_to_string(temp.path().join("config.json")).unwrap();
    assert!(saved.contains("http://menu.local/api"));

    menuboard_cmd(&temp)
        .args(["config", "api-base"])
        .assert()
        .success()
        .stdout("api-base http://menu.local/api\n");
}

#[test]
fn test_config_lists_defaults() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("api-base http://localhost:8000/api"))
        .stdout(predicate::str::contains("categories-page-size 10"))
        .stdout(predicate::str::contains("menus-page-size 12"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn test_config_rejects_non_http_api() {
    let temp = TempDir::new().unwrap();
    menuboard_cmd(&temp)
        .args(["config", "api-base", "ftp://menu.local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api-base must be an http(s) URL"));
}
