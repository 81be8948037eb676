use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PLAN: &str = r#"{
    "resource_changes": [
        {
            "address": "azurerm_storage_account.data",
            "type": "azurerm_storage_account",
            "change": {
                "actions": ["update"],
                "before": {"name": "stdata", "min_tls_version": "TLS1_0"},
                "after": {"name": "stdata", "min_tls_version": "TLS1_2"}
            }
        },
        {
            "address": "azurerm_resource_group.main",
            "type": "azurerm_resource_group",
            "change": {"actions": ["create"], "before": null, "after": {"name": "rg-main"}}
        },
        {
            "address": "random_id.suffix",
            "type": "random_id",
            "change": {"actions": ["create"], "before": null, "after": {"byte_length": 4}}
        }
    ]
}"#;

// Runs inside `dir` with no ambient configuration leaking in.
fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tftldr").unwrap();
    cmd.current_dir(dir)
        .env_remove("TFTLDR_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

fn workspace_with_plan() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tfplan.json"), PLAN).unwrap();
    dir
}

#[test]
fn test_renders_table_from_default_input() {
    let dir = workspace_with_plan();

    cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("UPDATE"))
        .stdout(predicate::str::contains("min_tls_version"))
        .stdout(predicate::str::contains("azurerm_resource_group.main"))
        .stdout(predicate::str::contains("random_id.suffix").not())
        .stdout(predicate::str::contains(
            "Plan: 1 to create, 1 to update, 0 to delete.",
        ));
}

#[test]
fn test_reads_plan_from_stdin() {
    let dir = tempfile::tempdir().unwrap();

    cmd(dir.path())
        .args(["--input", "-"])
        .write_stdin(PLAN)
        .assert()
        .success()
        .stdout(predicate::str::contains("rg-main"));
}

#[test]
fn test_config_file_in_working_directory_is_used() {
    let dir = workspace_with_plan();
    fs::write(
        dir.path().join(".tftldr.yml"),
        "ignore:\n  prefixes: []\ncolumns:\n  resourceAddress: false\n",
    )
    .unwrap();

    cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Resource Address").not())
        .stdout(predicate::str::contains("Plan: 2 to create"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = workspace_with_plan();

    cmd(dir.path())
        .args(["--config", "missing.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yml"));
}

#[test]
fn test_invalid_discovered_config_falls_back_to_defaults() {
    let dir = workspace_with_plan();
    fs::write(dir.path().join(".tftldr.yml"), "ignore: [unclosed").unwrap();

    cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("random_id.suffix").not())
        .stdout(predicate::str::contains("Resource Address"));
}

#[test]
fn test_exports_csv() {
    let dir = workspace_with_plan();

    cmd(dir.path())
        .args(["--csv", "changes.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported changes to CSV: changes.csv"));

    let csv = fs::read_to_string(dir.path().join("changes.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Change Type,Resource Name,Changed Parameters,Resource Type,Terraform Resource Address",
            "CREATE,rg-main,All parameters,azurerm_resource_group,azurerm_resource_group.main",
            "UPDATE,stdata,min_tls_version,azurerm_storage_account,azurerm_storage_account.data",
        ]
    );
}

#[test]
fn test_no_changes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tfplan.json"), r#"{"resource_changes": []}"#).unwrap();

    cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes."));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read plan 'tfplan.json'"));
}

#[test]
fn test_malformed_plan_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("plan.json"),
        r#"{"resource_changes": [{"address": "x.y"}]}"#,
    )
    .unwrap();

    cmd(dir.path())
        .args(["-i", "plan.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("resource_changes[0].type"));
}
