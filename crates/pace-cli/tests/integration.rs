#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pace(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pace").unwrap();
    cmd.current_dir(dir.path())
        .env("PACE_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn write_config(dir: &TempDir, yaml: &str) {
    std::fs::write(dir.path().join("pace.config.yaml"), yaml).unwrap();
}

fn cards(dir: &TempDir, sub: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path().join(sub))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// pace classify
// ---------------------------------------------------------------------------

#[test]
fn classify_json_reports_level_and_reasoning() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(
        pace(&dir).args(["--json", "classify", "design", "the", "checkout", "architecture"]),
    );
    assert_eq!(v["level"], 3);
    let confidence = v["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
    assert!(v["reasoning"].as_array().unwrap().len() >= 2);
}

#[test]
fn classify_reads_stdin_when_no_words() {
    let dir = TempDir::new().unwrap();
    let output = pace(&dir)
        .args(["-j", "classify"])
        .write_stdin("design the checkout architecture\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(v["level"], 3);
}

#[test]
fn classify_without_keywords_has_zero_confidence() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(pace(&dir).args(["--json", "classify", "hello", "world"]));
    assert_eq!(v["confidence"].as_f64().unwrap(), 0.0);
}

#[test]
fn classify_explain_prints_scores_and_tone() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .args(["classify", "--explain", "design", "the", "checkout", "architecture"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested level: Level 3"))
        .stdout(predicate::str::contains("MATCHES"))
        .stdout(predicate::str::contains("Tone:"))
        .stdout(predicate::str::contains("Base level:"));
}

#[test]
fn classify_explain_json_includes_raw_counts() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(pace(&dir).args([
        "--json",
        "classify",
        "--explain",
        "design the checkout architecture",
    ]));
    assert_eq!(v["raw"].as_array().unwrap().len(), 4);
    assert!(v["tone"].is_string());
    assert_eq!(v["classification"]["level"], 3);
}

// ---------------------------------------------------------------------------
// pace levels
// ---------------------------------------------------------------------------

#[test]
fn levels_lists_all_four() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .arg("levels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 1"))
        .stdout(predicate::str::contains("Level 4"))
        .stdout(predicate::str::contains("workflow:"));

    let v = json_stdout(pace(&dir).args(["levels", "--json"]));
    let levels = v.as_array().unwrap();
    assert_eq!(levels.len(), 4);
    assert_eq!(levels[1]["level"], 2);
    assert_eq!(levels[1]["name"], "integration and coordination");
}

// ---------------------------------------------------------------------------
// pace create
// ---------------------------------------------------------------------------

#[test]
fn create_with_explicit_level_writes_card() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .args([
            "create",
            "--title",
            "Sync Cart",
            "--description",
            "sync the cart between devices",
            "--goal",
            "fewer abandoned carts",
            "--level",
            "2",
            "--id",
            "PACE-L2-CART-001",
            "--criterion",
            "cart survives logout",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created PACE-L2-CART-001 (Level 2)"));

    let path = dir.path().join("specs/L2-cart-sync-cart.md");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("# Sync Cart"));
    assert!(content.contains("cart survives logout"));
}

#[test]
fn create_auto_classifies_without_level() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(pace(&dir).args([
        "--json",
        "create",
        "--title",
        "Checkout redesign",
        "--description",
        "design the checkout architecture",
        "--goal",
        "faster checkout",
    ]));
    assert_eq!(v["card"]["taskType"], 3);
    assert_eq!(v["classification"]["level"], 3);
    assert!(v["card"]["taskId"].as_str().unwrap().starts_with("PACE-L3-TASK-"));

    let names = cards(&dir, "specs");
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("L3-task-"));
}

#[test]
fn create_uses_config_prefix_and_output_dir() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        "project:\n  name: Shop\n  prefix: SHOP\noutput_dir: docs/cards\n",
    );
    let v = json_stdout(pace(&dir).args([
        "--json",
        "create",
        "--title",
        "Login",
        "--description",
        "add a login form",
        "--goal",
        "sign in",
        "--level",
        "1",
    ]));
    assert!(v["card"]["taskId"].as_str().unwrap().starts_with("SHOP-L1-TASK-"));
    assert_eq!(cards(&dir, "docs/cards").len(), 1);
}

#[test]
fn create_output_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .args([
            "create",
            "--title",
            "Login",
            "--description",
            "add a login form",
            "--goal",
            "sign in",
            "--level",
            "L1",
            "--output",
        ])
        .arg(dir.path().join("out"))
        .assert()
        .success();
    assert_eq!(cards(&dir, "out").len(), 1);
    assert!(!dir.path().join("specs").exists());
}

#[test]
fn relative_output_resolves_against_project_root() {
    let dir = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    pace(&dir)
        .current_dir(elsewhere.path())
        .args([
            "create",
            "--title",
            "Login",
            "--description",
            "add a login form",
            "--goal",
            "sign in",
            "--level",
            "1",
            "--output",
            "out",
        ])
        .assert()
        .success();
    assert_eq!(cards(&dir, "out").len(), 1);
    assert!(!elsewhere.path().join("out").exists());
}

#[test]
fn batch_relative_output_resolves_against_project_root() {
    let dir = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let tasks = dir.path().join("tasks.json");
    std::fs::write(&tasks, BATCH).unwrap();
    pace(&dir)
        .current_dir(elsewhere.path())
        .arg("batch")
        .arg(&tasks)
        .args(["--output", "cards"])
        .assert()
        .success();
    assert_eq!(cards(&dir, "cards").len(), 2);
    assert!(!elsewhere.path().join("cards").exists());
}

#[test]
fn create_blank_goal_fails_validation() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .args([
            "create",
            "--title",
            "Login",
            "--description",
            "add a login form",
            "--goal",
            "  ",
            "--level",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("missing business goal"));
    assert!(!dir.path().join("specs").exists());
}

#[test]
fn create_rejects_bad_level_and_estimation() {
    let dir = TempDir::new().unwrap();
    let base = [
        "create",
        "--title",
        "Login",
        "--description",
        "add a login form",
        "--goal",
        "sign in",
    ];
    pace(&dir).args(base).args(["--level", "7"]).assert().failure();
    pace(&dir)
        .args(base)
        .args(["--level", "1", "--estimation", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn create_reports_output_warnings() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .args([
            "create",
            "--title",
            "Login",
            "--description",
            "add a login form",
            "--goal",
            "sign in",
            "--level",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing user value"))
        .stdout(predicate::str::contains("missing acceptance criteria"));
}

// ---------------------------------------------------------------------------
// pace batch
// ---------------------------------------------------------------------------

const BATCH: &str = r#"[
    {"taskTitle": "Login form", "businessGoal": "sign in",
     "functionalDescription": "add a login form", "taskType": 1},
    {"taskTitle": "Broken"},
    {"taskTitle": "Checkout redesign", "businessGoal": "faster checkout",
     "functionalDescription": "design the checkout architecture"}
]"#;

#[test]
fn batch_generates_valid_records_and_reports_failures() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tasks.json"), BATCH).unwrap();

    pace(&dir)
        .args(["batch", "tasks.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 3 task cards generated"))
        .stdout(predicate::str::contains("Broken"));

    let names = cards(&dir, "specs");
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.starts_with("L1-")));
    assert!(names.iter().any(|n| n.starts_with("L3-")));
}

#[test]
fn batch_no_classify_fails_records_without_level() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tasks.json"), BATCH).unwrap();

    let v = json_stdout(pace(&dir).args(["--json", "batch", "tasks.json", "--no-classify"]));
    assert_eq!(v["generated"].as_array().unwrap().len(), 1);
    let failures = v["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0]["index"], 1);
    assert_eq!(failures[1]["label"], "Checkout redesign");
}

#[test]
fn batch_rejects_non_array_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tasks.json"), r#"{"taskTitle": "x"}"#).unwrap();
    pace(&dir)
        .args(["batch", "tasks.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read batch file"));
}

// ---------------------------------------------------------------------------
// pace template
// ---------------------------------------------------------------------------

#[test]
fn template_list_shows_built_in_sources() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("level-1-standardized.md"))
        .stdout(predicate::str::contains("built-in"));
}

#[test]
fn template_show_prints_source() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .args(["template", "show", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{{ taskTitle }}"));
}

#[test]
fn template_export_keeps_existing_files_without_force() {
    let dir = TempDir::new().unwrap();
    pace(&dir).args(["template", "export"]).assert().success();
    let exported = dir.path().join("templates/task-cards/level-2-integration.md");
    assert!(exported.is_file());

    std::fs::write(&exported, "custom\n").unwrap();
    pace(&dir)
        .args(["template", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept"));
    assert_eq!(std::fs::read_to_string(&exported).unwrap(), "custom\n");

    pace(&dir).args(["template", "export", "--force"]).assert().success();
    assert_ne!(std::fs::read_to_string(&exported).unwrap(), "custom\n");
}

#[test]
fn template_override_is_used_for_rendering() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "template_dir: my-templates\n");
    std::fs::create_dir_all(dir.path().join("my-templates")).unwrap();
    std::fs::write(
        dir.path().join("my-templates/level-1-standardized.md"),
        "CUSTOM {{ taskTitle }} / {{ taskId }}\n",
    )
    .unwrap();

    pace(&dir)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("my-templates"));

    pace(&dir)
        .args([
            "create",
            "--title",
            "Login",
            "--description",
            "add a login form",
            "--goal",
            "sign in",
            "--level",
            "1",
            "--id",
            "PACE-L1-AUTH-001",
        ])
        .assert()
        .success();
    let content =
        std::fs::read_to_string(dir.path().join("specs/L1-auth-login.md")).unwrap();
    assert_eq!(content, "CUSTOM Login / PACE-L1-AUTH-001\n");
}

// ---------------------------------------------------------------------------
// pace config
// ---------------------------------------------------------------------------

#[test]
fn config_init_writes_file_once() {
    let dir = TempDir::new().unwrap();
    pace(&dir)
        .args(["config", "init", "--name", "Shop", "--prefix", "SHOP"])
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("pace.config.yaml")).unwrap();
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
    assert_eq!(yaml["project"]["prefix"].as_str(), Some("SHOP"));

    pace(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    pace(&dir).args(["config", "init", "--force"]).assert().success();
}

#[test]
fn config_show_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(pace(&dir).args(["--json", "config", "show"]));
    assert_eq!(v["project"]["prefix"], "PACE");
    assert_eq!(v["output_dir"], "specs");
    assert_eq!(v["defaults"]["priority"], "P1");
}

#[test]
fn config_validate_warns_on_lowercase_prefix() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "project:\n  prefix: shop\nteam_members: [alice]\n");
    pace(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[warning]"));
}

#[test]
fn config_validate_fails_on_empty_prefix() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "project:\n  prefix: \"\"\n");
    pace(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"))
        .stderr(predicate::str::contains("config validation found errors"));
}

#[test]
fn invalid_config_yaml_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "project: [unclosed\n");
    pace(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
